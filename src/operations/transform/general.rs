use crate::math::Matrix4;
use crate::topology::{FaceId, Mesh};

/// Applies an arbitrary 4x4 transformation matrix to a face's vertices.
///
/// Vertices are shared, so neighbouring faces follow the moved corners;
/// this is how tapers and shears propagate along the hull.
pub struct GeneralTransform {
    face: FaceId,
    matrix: Matrix4,
}

impl GeneralTransform {
    /// Creates a new `GeneralTransform` operation.
    #[must_use]
    pub fn new(face: FaceId, matrix: Matrix4) -> Self {
        Self { face, matrix }
    }

    /// Executes the transformation, returning `false` for a stale face.
    pub fn execute(&self, mesh: &mut Mesh) -> bool {
        let Ok(face) = mesh.face(self.face) else {
            tracing::trace!(face = ?self.face, "skipping transform of stale face");
            return false;
        };
        let vertices = face.vertices.clone();
        mesh.transform_vertices(&vertices, &self.matrix);
        true
    }
}
