use tracing::trace;

use crate::operations::query::aspect_ratio;
use crate::operations::shaping::extrude_cap;
use crate::operations::transform::ScaleLocal;
use crate::topology::Mesh;

use super::config::GeneratorConfig;
use super::rng::RngStream;

/// Faces stretched further than this never sprout a bulge.
const MAX_BULGE_ASPECT: f64 = 4.0;

/// Extrudes short, tapering bulges from a random subset of faces.
///
/// Runs before mirroring, so a bulge on one side only survives if the
/// ship is not mirrored about that side's plane.
pub(crate) fn attach_bulges(mesh: &mut Mesh, rng: &mut RngStream, config: &GeneratorConfig) {
    for start in mesh.face_ids() {
        if aspect_ratio(mesh, start) > MAX_BULGE_ASPECT {
            continue;
        }
        if !rng.exceeds(1.0 - config.asymmetry_chance) {
            continue;
        }

        let length = rng.uniform(0.1, 0.4);
        let count = rng.int_range(
            config.num_asymmetry_segments_min,
            config.num_asymmetry_segments_max,
        );
        trace!(face = ?start, length, count, "attaching bulge");

        let mut face = start;
        for _ in 0..count {
            let Some(next) = extrude_cap(mesh, face, length) else {
                break;
            };
            face = next;
            if rng.exceeds(0.25) {
                let shrink = 1.0 / rng.uniform(1.1, 1.5);
                ScaleLocal::uniform(face, shrink).execute(mesh);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Matrix4, Vector3};
    use crate::operations::creation::MakeCube;
    use crate::operations::query::IsValid;

    #[test]
    fn zero_chance_leaves_mesh_alone() {
        let config = GeneratorConfig {
            asymmetry_chance: 0.0,
            ..GeneratorConfig::default()
        };
        let mut mesh = MakeCube::new(1.0).build();
        let before = mesh.to_mesh_data();
        attach_bulges(&mut mesh, &mut RngStream::from_u64(2), &config);
        assert_eq!(mesh.to_mesh_data(), before);
    }

    #[test]
    fn certain_chance_bulges_every_face() {
        let config = GeneratorConfig {
            asymmetry_chance: 1.0,
            num_asymmetry_segments_min: 1,
            num_asymmetry_segments_max: 1,
            ..GeneratorConfig::default()
        };
        let mut mesh = MakeCube::new(1.0).build();
        attach_bulges(&mut mesh, &mut RngStream::from_u64(2), &config);
        // six caps, each with four sides
        assert_eq!(mesh.face_count(), 6 + 6 * 4);
        assert!(IsValid::new().execute(&mesh));
    }

    #[test]
    fn slender_faces_are_left_alone() {
        let config = GeneratorConfig {
            asymmetry_chance: 1.0,
            num_asymmetry_segments_min: 1,
            num_asymmetry_segments_max: 1,
            ..GeneratorConfig::default()
        };
        let mut mesh = MakeCube::new(1.0).build();
        mesh.transform_all(&Matrix4::new_nonuniform_scaling(&Vector3::new(6.0, 1.0, 1.0)));
        attach_bulges(&mut mesh, &mut RngStream::from_u64(2), &config);
        // only the two end caps qualify
        assert_eq!(mesh.face_count(), 6 + 2 * 4);
    }
}
