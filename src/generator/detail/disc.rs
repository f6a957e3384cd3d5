use crate::operations::creation::MakeCone;
use crate::operations::query::{local_frame, width_height};
use crate::topology::{FaceId, MaterialTag, Mesh};

use super::super::rng::RngStream;

const DISC_SEGMENTS: usize = 32;

/// Mounts a wide shallow dish with a glowing ring under a face.
///
/// The dish's size follows the face alone, so it draws nothing from the
/// stream.
pub fn add_disc(mesh: &mut Mesh, face: FaceId, _rng: &mut RngStream) -> bool {
    let (width, height) = width_height(mesh, face);
    let (Some(center), Some(normal)) = (mesh.face_center(face), mesh.face_normal(face)) else {
        return false;
    };
    if width < 0.0 {
        return false;
    }

    let depth = 0.125 * width.min(height);
    let (Some(dish), Some(ring)) = (
        local_frame(mesh, face, Some(center + normal * (depth * 0.5))),
        local_frame(mesh, face, Some(center + normal * (depth * 1.05))),
    ) else {
        return false;
    };

    MakeCone::new(DISC_SEGMENTS, depth * 3.0, depth * 4.0, depth)
        .transform(dish)
        .execute(mesh);
    MakeCone::new(DISC_SEGMENTS, depth * 1.25, depth * 2.25, 0.0)
        .cap_ends(false)
        .transform(ring)
        .material(MaterialTag::GlowDisc)
        .execute(mesh);
    true
}
