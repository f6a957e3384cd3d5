use crate::operations::creation::MakeCone;
use crate::operations::query::local_frame;
use crate::topology::{FaceId, MaterialTag, Mesh};

use super::super::rng::RngStream;
use super::grid_point;

/// Scatters thin spires over a face.
///
/// A dense grid of candidate spots is laid over the face and roughly one
/// in ten gets a spire: a tall open cone standing on a short flared
/// collar, both with the same cross-section.
pub fn add_antenna(mesh: &mut Mesh, face: FaceId, rng: &mut RngStream) -> bool {
    let (Some(corners), Some(normal), Some(area)) = (
        mesh.face_corners(face),
        mesh.face_normal(face),
        mesh.face_area(face),
    ) else {
        return false;
    };
    if corners.len() < 4 {
        return false;
    }

    let columns = rng.int_inclusive(4, 10);
    let rows = rng.int_inclusive(4, 10);
    let face_size = area.sqrt();

    for i in 0..columns {
        for j in 0..rows {
            if !rng.exceeds(0.9) {
                continue;
            }
            let at = grid_point(&corners, i, columns, j, rows);

            let height = rng.uniform(0.1, 1.5) * face_size;
            let collar_height = height * rng.uniform(0.02, 0.15);
            let base_radius = rng.uniform(0.005, 0.05);
            let material = if rng.exceeds(0.5) {
                MaterialTag::Hull
            } else {
                MaterialTag::HullDark
            };
            let segments = rng.int_range(3, 6);

            let Some(spire) = local_frame(mesh, face, Some(at + normal * (height * 0.5))) else {
                return false;
            };
            MakeCone::new(segments, 0.0, base_radius, height)
                .cap_ends(false)
                .transform(spire)
                .material(material)
                .execute(mesh);

            let collar_top = base_radius * rng.uniform(1.0, 1.5);
            let collar_bottom = base_radius * rng.uniform(1.5, 2.0);
            let Some(collar) = local_frame(mesh, face, Some(at + normal * (collar_height * 0.45)))
            else {
                return false;
            };
            MakeCone::new(segments, collar_top, collar_bottom, collar_height)
                .transform(collar)
                .material(material)
                .execute(mesh);
        }
    }
    true
}
