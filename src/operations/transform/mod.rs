mod general;
mod rotate;
mod scale_local;
mod symmetrize;
mod translate;

pub use general::GeneralTransform;
pub use rotate::Rotate;
pub use scale_local::ScaleLocal;
pub use symmetrize::Symmetrize;
pub use translate::Translate;
