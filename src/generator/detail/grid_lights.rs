use crate::operations::shaping::{Extrude, SubdivideGrid};
use crate::operations::transform::ScaleLocal;
use crate::topology::{FaceId, MaterialTag, Mesh};

use super::super::rng::RngStream;

/// Faces steeper than this (by normal Z) can carry window lights.
const MAX_LIT_WALL_Z: f64 = 0.707;

/// Raises a grid of small panels, some of them with lit edges.
pub fn add_grid_lights(mesh: &mut Mesh, face: FaceId, rng: &mut RngStream) -> bool {
    if !mesh.contains_face(face) {
        return false;
    }

    let cuts = rng.int_inclusive(2, 4);
    let cells = SubdivideGrid::new(face, cuts).jitter(0.02).execute(mesh, rng);
    if cells.is_empty() {
        return false;
    }

    let height = rng.uniform(0.025, 0.15);
    for cell in cells {
        let material = if rng.exceeds(0.5) {
            MaterialTag::HullLights
        } else {
            MaterialTag::Hull
        };
        let Some(panel) = Extrude::new(cell, height).execute(mesh) else {
            continue;
        };
        // the cap lights up too when the panel stands on a side face
        for &part in panel.sides.iter().chain([&panel.face]) {
            let vertical = mesh
                .face_normal(part)
                .is_some_and(|n| n.z.abs() < MAX_LIT_WALL_Z);
            if vertical {
                mesh.set_material(part, material);
            }
        }
        ScaleLocal::uniform(panel.face, 0.8).execute(mesh);
    }
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use crate::operations::query::IsValid;

    use super::super::test_support::cube_face;

    #[test]
    fn panels_rise_from_the_face() {
        let (mut mesh, side) = cube_face(2.0, Vector3::y());
        assert!(add_grid_lights(&mut mesh, side, &mut RngStream::from_u64(21)));
        // 9 to 25 cells, each a raised cap with four walls
        let panels = mesh.face_count() - 5;
        assert_eq!(panels % 5, 0);
        assert!((45..=125).contains(&panels));
        assert!(IsValid::new().execute(&mesh));
    }

    #[test]
    fn horizontal_walls_are_never_lit() {
        for seed in 0..8 {
            let (mut mesh, side) = cube_face(2.0, Vector3::y());
            add_grid_lights(&mut mesh, side, &mut RngStream::from_u64(seed));
            for (id, f) in mesh.faces() {
                if f.material == MaterialTag::HullLights {
                    assert!(mesh.face_normal(id).unwrap().z.abs() < MAX_LIT_WALL_Z);
                }
            }
        }
    }

    #[test]
    fn top_faces_light_their_walls() {
        let (mut mesh, top) = cube_face(2.0, Vector3::z());
        add_grid_lights(&mut mesh, top, &mut RngStream::from_u64(3));
        let lit = mesh
            .faces()
            .filter(|(_, f)| f.material == MaterialTag::HullLights)
            .count();
        assert_eq!(lit % 4, 0);
    }

    #[test]
    fn side_panels_light_their_caps() {
        let mut caps = 0;
        for seed in 0..4 {
            let (mut mesh, side) = cube_face(2.0, Vector3::y());
            add_grid_lights(&mut mesh, side, &mut RngStream::from_u64(seed));
            let lit: Vec<FaceId> = mesh
                .faces()
                .filter(|(_, f)| f.material == MaterialTag::HullLights)
                .map(|(id, _)| id)
                .collect();
            // a cap and its two upright walls per lit panel
            assert_eq!(lit.len() % 3, 0);
            caps += lit
                .iter()
                .filter(|&&f| mesh.face_normal(f).unwrap().y > 0.9)
                .count();
        }
        assert!(caps > 0);
    }
}
