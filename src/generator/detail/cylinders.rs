use crate::math::{self, Axis};
use crate::operations::creation::MakeCone;
use crate::operations::query::{local_frame, width_height};
use crate::topology::{FaceId, Mesh};

use super::super::rng::RngStream;
use super::grid_point;

/// Lays a grid of half-sunk horizontal cylinders across a face.
#[allow(clippy::cast_precision_loss)]
pub fn add_cylinders(mesh: &mut Mesh, face: FaceId, rng: &mut RngStream) -> bool {
    let (width, height) = width_height(mesh, face);
    let Some(corners) = mesh.face_corners(face).filter(|_| width >= 0.0) else {
        return false;
    };

    let columns = rng.int_inclusive(1, 3);
    let rows = rng.int_inclusive(1, 3);
    let segments = rng.int_inclusive(6, 12);
    let length = 1.3 * (width / (columns + 2) as f64).min(height / (rows + 2) as f64);
    let radius = length * 0.5;

    let lay_flat = math::rotation(Axis::X, 90.0);
    for i in 0..columns {
        for j in 0..rows {
            let at = grid_point(&corners, i, columns, j, rows);
            let Some(frame) = local_frame(mesh, face, Some(at)) else {
                return false;
            };
            MakeCone::new(segments, radius, radius, length)
                .transform(frame * lay_flat)
                .execute(mesh);
        }
    }
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::operations::query::{BoundingBox, IsValid};
    use crate::topology::MaterialTag;

    use super::super::test_support::cube_face;

    #[test]
    fn cylinders_sit_on_the_face() {
        let (mut mesh, top) = cube_face(2.0, Vector3::z());
        assert!(add_cylinders(&mut mesh, top, &mut RngStream::from_u64(6)));
        // the face itself stays
        assert!(mesh.contains_face(top));
        assert!(mesh.face_count() > 6);
        assert!(IsValid::new().execute(&mesh));

        // centered on the face plane: half above, never wider than the face
        let aabb = BoundingBox::new().execute(&mesh).unwrap();
        assert!(aabb.max.z > 1.0);
        assert!(aabb.max.z < 1.0 + 0.45);
    }

    #[test]
    fn triangles_have_no_cylinders() {
        let mut mesh = Mesh::new();
        let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        let tri = mesh.add_face(vec![a, b, c], MaterialTag::Hull).unwrap();
        assert!(!add_cylinders(&mut mesh, tri, &mut RngStream::from_u64(0)));
        assert_eq!(mesh.face_count(), 1);
    }
}
