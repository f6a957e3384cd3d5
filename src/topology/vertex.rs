use crate::math::Point3;

slotmap::new_key_type! {
    /// Generational handle to a mesh vertex.
    pub struct VertexId;
}

/// A mesh corner. Vertices carry only a position; faces and edges refer
/// to them by handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexData {
    pub point: Point3,
}

impl From<Point3> for VertexData {
    fn from(point: Point3) -> Self {
        Self { point }
    }
}
