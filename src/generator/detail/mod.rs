//! Detail generators that decorate a single face.
//!
//! Each generator reads the face's frame and size, draws its own
//! parameters from the run's stream, and either reshapes the face or
//! attaches new primitives on top of it. A stale or unsuitable face is
//! skipped and reported as `false`.

mod antenna;
mod cylinders;
mod disc;
mod exhaust;
mod grid_lights;
mod sphere;
mod weapons;

pub use antenna::add_antenna;
pub use cylinders::add_cylinders;
pub use disc::add_disc;
pub use exhaust::add_exhaust;
pub use grid_lights::add_grid_lights;
pub use sphere::add_sphere;
pub use weapons::add_weapons;

use crate::math::Point3;
use crate::topology::{FaceId, Mesh};

use super::categorize::DetailKind;
use super::rng::RngStream;

/// Runs the generator for `kind` on `face`.
pub fn add_detail(kind: DetailKind, mesh: &mut Mesh, face: FaceId, rng: &mut RngStream) -> bool {
    match kind {
        DetailKind::Engine => add_exhaust(mesh, face, rng),
        DetailKind::Grid => add_grid_lights(mesh, face, rng),
        DetailKind::Antenna => add_antenna(mesh, face, rng),
        DetailKind::Weapons => add_weapons(mesh, face, rng),
        DetailKind::Sphere => add_sphere(mesh, face, rng),
        DetailKind::Disc => add_disc(mesh, face, rng),
        DetailKind::Cylinders => add_cylinders(mesh, face, rng),
    }
}

/// Interior point `(i, j)` of an evenly spaced `columns x rows` grid
/// laid over the first four geometric corners of a face.
#[allow(clippy::cast_precision_loss)]
fn grid_point(corners: &[Point3], i: usize, columns: usize, j: usize, rows: usize) -> Point3 {
    let u = (i + 1) as f64 / (columns + 1) as f64;
    let v = (j + 1) as f64 / (rows + 1) as f64;
    let near = corners[0] + (corners[1] - corners[0]) * u;
    let far = corners[3] + (corners[2] - corners[3]) * u;
    near + (far - near) * v
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use crate::operations::shaping::SubdivideGrid;
    use crate::topology::VertexId;
    use approx::assert_relative_eq;
    use std::collections::HashSet;

    /// A 2x2x2 cube whose top was cut into a grid, and its +X side, which
    /// now carries the grid's split points on its upper edge.
    fn beside_a_grid() -> (Mesh, FaceId) {
        let (mut mesh, top) = test_support::cube_face(2.0, Vector3::z());
        SubdivideGrid::new(top, 2).execute(&mut mesh, &mut RngStream::from_u64(0));
        let side = mesh
            .face_ids()
            .into_iter()
            .find(|&f| mesh.face_normal(f).unwrap().x > 0.9)
            .unwrap();
        assert_eq!(mesh.face(side).unwrap().vertices.len(), 6);
        (mesh, side)
    }

    #[test]
    fn grid_points_are_evenly_spaced() {
        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(3.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ];
        assert_relative_eq!(grid_point(&corners, 0, 2, 0, 1), Point3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(grid_point(&corners, 1, 2, 0, 1), Point3::new(2.0, 1.0, 0.0));
        assert_relative_eq!(grid_point(&corners, 0, 1, 2, 3), Point3::new(1.5, 1.5, 0.0));
    }

    #[test]
    fn faces_beside_a_grid_keep_their_details() {
        for kind in DetailKind::DISPATCH_ORDER {
            let (mut mesh, side) = beside_a_grid();
            let mut rng = RngStream::from_u64(3);
            assert!(add_detail(kind, &mut mesh, side, &mut rng), "{kind:?}");
        }
    }

    #[test]
    fn turrets_beside_a_grid_spread_over_the_whole_face() {
        for seed in 0..8 {
            let (mut mesh, side) = beside_a_grid();
            let before: HashSet<VertexId> = mesh.vertices().map(|(id, _)| id).collect();
            assert!(add_weapons(&mut mesh, side, &mut RngStream::from_u64(seed)));

            let added: Vec<Point3> = mesh
                .vertices()
                .filter(|(id, _)| !before.contains(id))
                .map(|(_, v)| v.point)
                .collect();
            assert!(!added.is_empty());
            for p in &added {
                assert!(p.y.abs() < 1.0 && p.z.abs() < 1.0, "{p:?} leaves the face");
            }
            for axis in [1, 2] {
                assert!(added.iter().any(|p| p[axis] < 0.0));
                assert!(added.iter().any(|p| p[axis] > 0.0));
            }
        }
    }

    #[test]
    fn stale_faces_are_skipped_by_every_kind() {
        let (mut mesh, face) = test_support::cube_face(1.0, crate::math::Vector3::z());
        mesh.remove_face(face);
        let before = mesh.to_mesh_data();
        let mut rng = RngStream::from_u64(0);
        for kind in DetailKind::DISPATCH_ORDER {
            assert!(!add_detail(kind, &mut mesh, face, &mut rng));
        }
        assert_eq!(mesh.to_mesh_data(), before);
    }
}
