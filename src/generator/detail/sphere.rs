use crate::operations::creation::MakeIcosphere;
use crate::operations::query::{local_frame, width_height};
use crate::topology::{FaceId, Mesh};

use super::super::rng::RngStream;

/// Half-buries a sphere in the middle of a face.
pub fn add_sphere(mesh: &mut Mesh, face: FaceId, rng: &mut RngStream) -> bool {
    let (width, height) = width_height(mesh, face);
    let (Some(center), Some(normal)) = (mesh.face_center(face), mesh.face_normal(face)) else {
        return false;
    };
    if width < 0.0 {
        return false;
    }

    let radius = rng.uniform(0.4, 1.0) * width.min(height);
    let sink = rng.uniform(0.0, radius * 0.5);
    let Some(frame) = local_frame(mesh, face, Some(center - normal * sink)) else {
        return false;
    };
    !MakeIcosphere::new(2, radius)
        .transform(frame)
        .execute(mesh)
        .is_empty()
}
