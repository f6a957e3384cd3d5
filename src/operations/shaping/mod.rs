mod extrude;
mod ribbed_extrude;
mod subdivide_grid;

pub use extrude::{ExtrudedFace, Extrude};
pub use ribbed_extrude::RibbedExtrude;
pub use subdivide_grid::SubdivideGrid;

pub(crate) use extrude::extrude_cap;
