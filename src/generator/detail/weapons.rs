use crate::math::{self, Axis, Matrix4};
use crate::operations::creation::MakeCone;
use crate::operations::query::{local_frame, width_height};
use crate::topology::{FaceId, Mesh};

use super::super::rng::RngStream;
use super::grid_point;

/// Mounts a grid of turrets on a face.
///
/// Each turret is a squat foundation, two side mounts, a tilted housing
/// and a pair of barrels, all placed relative to one randomly yawed
/// frame so the parts stay attached to each other.
#[allow(clippy::cast_precision_loss)]
pub fn add_weapons(mesh: &mut Mesh, face: FaceId, rng: &mut RngStream) -> bool {
    let (width, height) = width_height(mesh, face);
    let (Some(corners), Some(normal)) = (mesh.face_corners(face), mesh.face_normal(face)) else {
        return false;
    };
    if width < 0.0 {
        return false;
    }

    let columns = rng.int_inclusive(1, 2);
    let rows = rng.int_inclusive(1, 2);
    let size = 0.5 * (width / (columns + 2) as f64).min(height / (rows + 2) as f64);
    let depth = size * 0.2;

    for i in 0..columns {
        for j in 0..rows {
            let at = grid_point(&corners, i, columns, j, rows) + normal * (depth * 0.5);
            let Some(frame) = local_frame(mesh, face, Some(at)) else {
                return false;
            };
            let base = frame * math::rotation(Axis::Z, rng.uniform(0.0, 90.0));
            let pitch = rng.uniform(0.0, 45.0);
            add_turret(mesh, &base, size, depth, pitch);
        }
    }
    true
}

fn add_turret(mesh: &mut Mesh, base: &Matrix4, size: f64, depth: f64, pitch: f64) {
    // foundation
    MakeCone::new(16, size * 0.9, size, depth)
        .transform(*base)
        .execute(mesh);

    // side mounts, lying along local X
    let mount = base * math::rotation(Axis::Y, 90.0);
    MakeCone::new(16, size * 0.6, size * 0.5, depth * 2.0)
        .transform(mount * math::translation(0.0, 0.0, size * 0.6))
        .execute(mesh);
    MakeCone::new(16, size * 0.5, size * 0.6, depth * 2.0)
        .transform(mount * math::translation(0.0, 0.0, -size * 0.6))
        .execute(mesh);

    let housing = base * math::rotation(Axis::X, pitch) * math::translation(0.0, -size * 0.4, 0.0);
    MakeCone::new(8, size * 0.4, size * 0.4, depth * 5.0)
        .transform(housing)
        .execute(mesh);

    for side in [-1.0, 1.0] {
        MakeCone::new(8, size * 0.1, size * 0.1, depth * 6.0)
            .transform(housing * math::translation(side * size * 0.2, 0.0, -size))
            .execute(mesh);
    }
}
