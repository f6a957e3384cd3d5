use crate::math::{Matrix4, Vector3};
use crate::topology::{FaceId, Mesh};

use super::GeneralTransform;

/// Translates a face's vertices by a displacement vector.
pub struct Translate {
    face: FaceId,
    displacement: Vector3,
}

impl Translate {
    /// Creates a new `Translate` operation.
    #[must_use]
    pub fn new(face: FaceId, displacement: Vector3) -> Self {
        Self { face, displacement }
    }

    /// Executes the translation, returning `false` for a stale face.
    pub fn execute(&self, mesh: &mut Mesh) -> bool {
        GeneralTransform::new(self.face, Matrix4::new_translation(&self.displacement)).execute(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::MakeCube;
    use approx::assert_relative_eq;

    #[test]
    fn shears_a_cube_face_sideways() {
        let mut mesh = MakeCube::new(2.0).build();
        let front = mesh
            .face_ids()
            .into_iter()
            .find(|&f| mesh.face_normal(f).unwrap().x > 0.9)
            .unwrap();
        Translate::new(front, Vector3::new(0.0, 0.0, 0.5)).execute(&mut mesh);

        assert_relative_eq!(mesh.face_center(front).unwrap().z, 0.5);
        // the face itself still points along +X
        assert_relative_eq!(mesh.face_normal(front).unwrap(), Vector3::x());
    }
}
