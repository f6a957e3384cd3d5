mod make_cone;
mod make_cube;
mod make_icosphere;

pub use make_cone::MakeCone;
pub use make_cube::MakeCube;
pub use make_icosphere::MakeIcosphere;

use crate::topology::{FaceId, VertexId};

/// Geometry added to a mesh by a primitive constructor.
///
/// Faces and vertices are returned separately so callers can re-tag the
/// faces or post-process the vertices without inspecting element types.
#[derive(Debug, Clone, Default)]
pub struct PrimitiveGeometry {
    /// Newly created faces, in construction order.
    pub faces: Vec<FaceId>,
    /// Newly created vertices, in construction order.
    pub vertices: Vec<VertexId>,
}

impl PrimitiveGeometry {
    /// Returns `true` if nothing was created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}
