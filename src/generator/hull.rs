use tracing::trace;

use crate::math::{Point3, Vector3};
use crate::operations::shaping::{extrude_cap, RibbedExtrude};
use crate::operations::transform::{Rotate, ScaleLocal, Translate};
use crate::topology::{FaceId, Mesh};

use super::config::GeneratorConfig;
use super::rng::RngStream;

/// Grows a chain of segments out of every face of `mesh` that points
/// mostly along the ship's X axis.
///
/// `scale` is the per-axis scale the starting cube was stretched by; it
/// bounds how far a segment may drift vertically.
pub(crate) fn grow_hull(
    mesh: &mut Mesh,
    rng: &mut RngStream,
    config: &GeneratorConfig,
    scale: &Vector3,
) {
    for start in mesh.face_ids() {
        let Some(normal) = mesh.face_normal(start) else {
            continue;
        };
        if normal.x.abs() <= 0.5 {
            continue;
        }

        let length = rng.uniform(0.3, 1.0);
        let count = rng.int_range(config.num_hull_segments_min, config.num_hull_segments_max);
        trace!(face = ?start, length, count, "growing hull chain");

        let mut face = start;
        for i in 0..count {
            let last = i + 1 == count;
            match grow_segment(mesh, rng, config, scale, face, length, last) {
                Some(next) => face = next,
                None => break,
            }
        }
    }
}

/// One segment of a hull chain. Returns the new end face.
fn grow_segment(
    mesh: &mut Mesh,
    rng: &mut RngStream,
    config: &GeneratorConfig,
    scale: &Vector3,
    face: FaceId,
    length: f64,
    last: bool,
) -> Option<FaceId> {
    if !rng.exceeds(config.ribbed_segment_chance) {
        let rib_scale = rng.uniform(0.75, 0.95);
        let ribs = rng.int_inclusive(2, 4);
        return RibbedExtrude::new(face, length, ribs, rib_scale).execute(mesh);
    }

    let mut face = extrude_cap(mesh, face, length)?;
    if rng.exceeds(0.75) {
        face = extrude_cap(mesh, face, length * 0.25)?;
    }

    // taper or flare; the final segment always tapers
    if rng.exceeds(0.5) {
        let mut sy = rng.uniform(1.2, 1.5);
        let mut sz = rng.uniform(1.2, 1.5);
        if last || rng.exceeds(0.5) {
            sy = 1.0 / sy;
            sz = 1.0 / sz;
        }
        ScaleLocal::new(face, Vector3::new(1.0, sy, sz)).execute(mesh);
    }

    if rng.exceeds(0.5) {
        let mut lift = rng.uniform(0.1, 0.4) * scale.z * length;
        if rng.exceeds(0.5) {
            lift = -lift;
        }
        Translate::new(face, Vector3::new(0.0, 0.0, lift)).execute(mesh);
    }

    if rng.exceeds(0.5) {
        let degrees = if rng.exceeds(0.5) { -5.0 } else { 5.0 };
        Rotate::new(face, Point3::origin(), Vector3::y(), degrees).execute(mesh);
    }

    Some(face)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::MakeCube;
    use crate::operations::query::{BoundingBox, IsValid};

    #[test]
    fn hull_grows_along_x_only() {
        let mut mesh = MakeCube::new(1.0).build();
        let config = GeneratorConfig::default();
        grow_hull(&mut mesh, &mut RngStream::from_u64(11), &config, &Vector3::repeat(1.0));

        assert!(mesh.face_count() > 6);
        assert!(IsValid::new().execute(&mesh));
        let aabb = BoundingBox::new().execute(&mesh).unwrap();
        // at least three segments of at least 0.3 on each end, give or take tilt
        assert!(aabb.min.x < -1.0);
        assert!(aabb.max.x > 1.0);
    }

    #[test]
    fn fixed_segment_count_without_ribs() {
        let config = GeneratorConfig {
            num_hull_segments_min: 2,
            num_hull_segments_max: 2,
            ribbed_segment_chance: 0.0,
            ..GeneratorConfig::default()
        };
        let mut mesh = MakeCube::new(1.0).build();
        grow_hull(&mut mesh, &mut RngStream::from_u64(4), &config, &Vector3::repeat(1.0));
        // two ends, two segments each, one or two extrusions of four sides per segment
        let added = mesh.face_count() - 6;
        assert_eq!(added % 4, 0);
        assert!((16..=32).contains(&added));
    }

    #[test]
    fn same_stream_same_hull() {
        let config = GeneratorConfig::default();
        let build = || {
            let mut mesh = MakeCube::new(1.0).build();
            grow_hull(&mut mesh, &mut RngStream::from_u64(99), &config, &Vector3::repeat(1.0));
            mesh.to_mesh_data()
        };
        assert_eq!(build(), build());
    }
}
