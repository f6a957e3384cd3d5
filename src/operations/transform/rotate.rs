use crate::math::{Matrix4, Point3, Vector3, TOLERANCE};
use crate::topology::{FaceId, Mesh};

use super::GeneralTransform;

/// Rotates a face's vertices around an axis.
pub struct Rotate {
    face: FaceId,
    axis_origin: Point3,
    axis_direction: Vector3,
    degrees: f64,
}

impl Rotate {
    /// Creates a new `Rotate` operation.
    ///
    /// * `degrees` - Rotation angle in degrees, counter-clockwise looking
    ///   down the axis.
    #[must_use]
    pub fn new(face: FaceId, axis_origin: Point3, axis_direction: Vector3, degrees: f64) -> Self {
        Self {
            face,
            axis_origin,
            axis_direction,
            degrees,
        }
    }

    /// Executes the rotation. Returns `false` for a stale face or a
    /// zero-length axis.
    pub fn execute(&self, mesh: &mut Mesh) -> bool {
        let Some(axis) = nalgebra::Unit::try_new(self.axis_direction, TOLERANCE) else {
            tracing::trace!("skipping rotation about a zero-length axis");
            return false;
        };

        // Translate to origin, rotate, translate back
        let t_neg = Matrix4::new_translation(&(-self.axis_origin.coords));
        let rot = Matrix4::from_axis_angle(&axis, self.degrees.to_radians());
        let t_pos = Matrix4::new_translation(&self.axis_origin.coords);
        let matrix = t_pos * rot * t_neg;

        GeneralTransform::new(self.face, matrix).execute(mesh)
    }
}
