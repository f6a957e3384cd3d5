use crate::math::{Matrix4, Vector3};
use crate::operations::query::FaceFrame;
use crate::topology::{FaceId, Mesh};

use super::GeneralTransform;

/// Scales a face's vertices in the face's own local frame.
///
/// The frame origin (the face's bounds center) stays put, so a face can
/// be pinched or flared without drifting. `factors` are per local axis:
/// X along the first boundary edge, Y across it, Z along the normal.
pub struct ScaleLocal {
    face: FaceId,
    factors: Vector3,
}

impl ScaleLocal {
    /// Creates a new `ScaleLocal` operation.
    #[must_use]
    pub fn new(face: FaceId, factors: Vector3) -> Self {
        Self { face, factors }
    }

    /// Uniform scale by `factor` on all three local axes.
    #[must_use]
    pub fn uniform(face: FaceId, factor: f64) -> Self {
        Self::new(face, Vector3::repeat(factor))
    }

    /// Executes the scale. Returns `false` for stale or degenerate faces.
    pub fn execute(&self, mesh: &mut Mesh) -> bool {
        let Some(frame) = FaceFrame::new(mesh, self.face) else {
            tracing::trace!(face = ?self.face, "skipping local scale of degenerate face");
            return false;
        };
        let matrix =
            frame.matrix() * Matrix4::new_nonuniform_scaling(&self.factors) * frame.inverse();
        GeneralTransform::new(self.face, matrix).execute(mesh)
    }
}
