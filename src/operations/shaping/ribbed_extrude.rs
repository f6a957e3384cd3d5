use crate::operations::transform::ScaleLocal;
use crate::topology::{FaceId, Mesh};

use super::extrude::extrude_cap;

/// Extrudes a face in accordion-like ribs.
///
/// Each rib covers `distance / ribs` and is built from five extrusions:
/// a quarter forward, a zero-length step shrunk by `rib_scale`, half
/// forward, a zero-length step grown back by `1 / rib_scale`, and the
/// last quarter forward.
pub struct RibbedExtrude {
    face: FaceId,
    distance: f64,
    ribs: usize,
    rib_scale: f64,
}

impl RibbedExtrude {
    /// Creates a new `RibbedExtrude` operation.
    #[must_use]
    pub fn new(face: FaceId, distance: f64, ribs: usize, rib_scale: f64) -> Self {
        Self {
            face,
            distance,
            ribs,
            rib_scale,
        }
    }

    /// Executes the extrusion and returns the final cap.
    ///
    /// Returns `None` when the face is stale or degenerate, or when
    /// `ribs` is zero or `rib_scale` is not positive. A degenerate step
    /// midway ends the chain early and also returns `None`.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self, mesh: &mut Mesh) -> Option<FaceId> {
        if self.ribs == 0 || self.rib_scale <= 0.0 {
            tracing::trace!(ribs = self.ribs, rib_scale = self.rib_scale, "skipping ribbed extrude");
            return None;
        }
        let per_rib = self.distance / self.ribs as f64;
        let mut face = self.face;
        for _ in 0..self.ribs {
            face = extrude_cap(mesh, face, per_rib * 0.25)?;
            face = extrude_cap(mesh, face, 0.0)?;
            ScaleLocal::uniform(face, self.rib_scale).execute(mesh);
            face = extrude_cap(mesh, face, per_rib * 0.5)?;
            face = extrude_cap(mesh, face, 0.0)?;
            ScaleLocal::uniform(face, 1.0 / self.rib_scale).execute(mesh);
            face = extrude_cap(mesh, face, per_rib * 0.25)?;
        }
        Some(face)
    }
}
