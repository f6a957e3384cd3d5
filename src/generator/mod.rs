//! Procedural spaceship generation.
//!
//! A run starts from a randomly stretched cube, grows hull segments out of
//! its front and back, sprinkles one-sided bulges, decorates faces by the
//! direction they point, optionally mirrors the result and freezes it.
//! Every random choice comes from one [`RngStream`] in a fixed order, so
//! the same seed and config always give the same ship.

mod asymmetry;
mod categorize;
mod config;
pub mod detail;
mod hull;
mod rng;

pub use categorize::{categorize_faces, DetailKind, DetailPlan, DetailSummary, Facing};
pub use config::{DetailThresholds, GeneratorConfig};
pub use rng::RngStream;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::math::{Axis, Matrix4, Vector3};
use crate::operations::creation::MakeCube;
use crate::operations::query::RecenterToCentroid;
use crate::operations::transform::Symmetrize;
use crate::tessellation::{TessellateMesh, TriangleMesh};
use crate::topology::{MaterialTag, Mesh, MeshData};

/// Cosmetic bevel the caller may apply to the finished mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BevelHint {
    /// Bevel width as a percentage of adjacent edge length, in `[5, 20)`.
    pub width_percent: f64,
    /// Bevel segment count.
    pub segments: u32,
    /// Bevel profile shape.
    pub profile: f64,
}

impl BevelHint {
    fn new(width_percent: f64) -> Self {
        Self {
            width_percent,
            segments: 2,
            profile: 0.25,
        }
    }
}

/// A finished ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spaceship {
    /// The frozen polygon mesh with per-face material tags.
    pub mesh: MeshData,
    /// Translation that moves the mesh's volume centroid to the origin.
    /// Apply it to the placement, not to the vertices.
    pub origin_offset: Vector3,
    /// Recommended bevel, when enabled in the config.
    pub bevel: Option<BevelHint>,
    /// Planes the mesh was mirrored about, in the order applied.
    pub mirrored: Vec<Axis>,
    /// The seed the run was started from, if any.
    pub seed: Option<String>,
    /// Categorization counts, when face detail was enabled.
    pub details: Option<DetailSummary>,
}

impl Spaceship {
    /// Fan-triangulates the mesh for rendering.
    #[must_use]
    pub fn triangulate(&self) -> TriangleMesh {
        TessellateMesh::new(&self.mesh).execute()
    }
}

/// Generates one ship.
///
/// A missing or empty `seed` makes the run non-reproducible.
///
/// # Errors
///
/// Returns a configuration error if `config` fails validation. Geometry
/// problems met along the way are skipped, never reported.
#[instrument(skip(config))]
pub fn generate(seed: Option<&str>, config: &GeneratorConfig) -> Result<Spaceship> {
    config.validate()?;
    let mut rng = RngStream::new(seed);

    let mut mesh = MakeCube::new(1.0).build();
    let scale = Vector3::new(
        rng.uniform(0.75, 2.0),
        rng.uniform(0.75, 2.0),
        rng.uniform(0.75, 2.0),
    );
    mesh.transform_all(&Matrix4::new_nonuniform_scaling(&scale));

    hull::grow_hull(&mut mesh, &mut rng, config, &scale);
    debug!(faces = mesh.face_count(), "hull grown");

    if config.create_asymmetry_segments {
        asymmetry::attach_bulges(&mut mesh, &mut rng, config);
        debug!(faces = mesh.face_count(), "bulges attached");
    }

    let details = config
        .create_face_detail
        .then(|| add_face_detail(&mut mesh, &mut rng, config));

    let mut mirrored = Vec::new();
    if config.allow_horizontal_symmetry && rng.exceeds(0.5) {
        Symmetrize::new(Axis::Y).execute(&mut mesh);
        mirrored.push(Axis::Y);
    }
    if config.allow_vertical_symmetry && rng.exceeds(0.5) {
        Symmetrize::new(Axis::Z).execute(&mut mesh);
        mirrored.push(Axis::Z);
    }
    debug!(?mirrored, "symmetry applied");

    let bevel = config
        .apply_bevel_hint
        .then(|| BevelHint::new(rng.uniform(5.0, 20.0)));

    let dropped = mesh.remove_degenerate_faces();
    mesh.remove_loose_vertices();
    if dropped > 0 {
        debug!(dropped, "degenerate faces removed");
    }
    if !config.assign_material_tags {
        for face in mesh.face_ids() {
            mesh.set_material(face, MaterialTag::Hull);
        }
    }

    let origin_offset = RecenterToCentroid::new()
        .execute(&mesh)
        .unwrap_or_else(Vector3::zeros);
    let data = mesh.to_mesh_data();
    info!(
        vertices = data.vertex_count(),
        faces = data.face_count(),
        "spaceship generated"
    );

    Ok(Spaceship {
        mesh: data,
        origin_offset,
        bevel,
        mirrored,
        seed: seed.map(str::to_owned),
        details,
    })
}

/// Generates one ship per seed in parallel.
///
/// Each run owns its mesh and stream, so the result for every seed is
/// the same as calling [`generate`] with it. Results keep seed order.
///
/// # Errors
///
/// Returns a configuration error if `config` fails validation.
pub fn generate_batch<S>(seeds: &[S], config: &GeneratorConfig) -> Result<Vec<Spaceship>>
where
    S: AsRef<str> + Sync,
{
    config.validate()?;
    seeds
        .par_iter()
        .map(|seed| generate(Some(seed.as_ref()), config))
        .collect()
}

fn add_face_detail(mesh: &mut Mesh, rng: &mut RngStream, config: &GeneratorConfig) -> DetailSummary {
    let plan = categorize_faces(mesh, rng, &config.thresholds);
    for &face in &plan.lit {
        mesh.set_material(face, MaterialTag::HullLights);
    }
    debug!(bucketed = plan.bucketed(), lit = plan.lit.len(), "faces categorized");

    let mut applied = 0;
    for kind in DetailKind::DISPATCH_ORDER {
        for &face in plan.faces(kind) {
            applied += usize::from(detail::add_detail(kind, mesh, face, rng));
        }
    }
    debug!(applied, faces = mesh.face_count(), "details dispatched");
    plan.summary()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn bare() -> GeneratorConfig {
        GeneratorConfig {
            create_asymmetry_segments: false,
            create_face_detail: false,
            allow_horizontal_symmetry: false,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn bare_hull_is_plain_hull() {
        let ship = generate(Some("bare"), &bare()).unwrap();
        assert!(ship.details.is_none());
        assert!(ship.mirrored.is_empty());
        assert!(ship.mesh.face_count() > 6);
        assert_eq!(ship.mesh.count_material(MaterialTag::Hull), ship.mesh.face_count());
    }

    #[test]
    fn bevel_hint_is_in_range() {
        let ship = generate(Some("bevel"), &bare()).unwrap();
        let bevel = ship.bevel.unwrap();
        assert!((5.0..20.0).contains(&bevel.width_percent));
        assert_eq!(bevel.segments, 2);

        let config = GeneratorConfig {
            apply_bevel_hint: false,
            ..bare()
        };
        assert!(generate(Some("bevel"), &config).unwrap().bevel.is_none());
    }

    #[test]
    fn placeholder_tags_when_materials_are_off() {
        let config = GeneratorConfig {
            assign_material_tags: false,
            ..GeneratorConfig::default()
        };
        let ship = generate(Some("plain"), &config).unwrap();
        assert_eq!(ship.mesh.count_material(MaterialTag::Hull), ship.mesh.face_count());
    }

    #[test]
    fn invalid_config_stops_before_any_work() {
        let config = GeneratorConfig {
            num_asymmetry_segments_min: 5,
            num_asymmetry_segments_max: 1,
            ..GeneratorConfig::default()
        };
        assert!(generate(Some("x"), &config).is_err());
        assert!(generate_batch(&["a", "b"], &config).is_err());
    }

    #[test]
    fn forced_mirrors_are_recorded() {
        // try a handful of seeds so both coin flips land heads at least once
        let config = GeneratorConfig {
            allow_horizontal_symmetry: true,
            allow_vertical_symmetry: true,
            ..bare()
        };
        let both = (0..32)
            .map(|i| generate(Some(format!("mirror-{i}").as_str()), &config).unwrap())
            .find(|ship| ship.mirrored == vec![Axis::Y, Axis::Z])
            .unwrap();
        let aabb = both.mesh.bounding_box().unwrap();
        assert!(aabb.is_symmetric_about(Axis::Y, 1e-9));
        assert!(aabb.is_symmetric_about(Axis::Z, 1e-9));
    }

    #[test]
    fn triangulation_covers_the_mesh() {
        let ship = generate(Some("tris"), &GeneratorConfig::default()).unwrap();
        let tris = ship.triangulate();
        assert!(tris.triangle_count() >= ship.mesh.face_count());
        assert_eq!(tris.materials.len(), tris.triangle_count());
    }

    #[test]
    fn finished_mesh_rebuilds_valid() {
        let ship = generate(Some("valid"), &GeneratorConfig::default()).unwrap();
        for face in 0..ship.mesh.face_count() {
            let n = ship.mesh.face_normal(face).unwrap();
            assert!((n.norm() - 1.0).abs() < 1e-9);
            assert!(ship.mesh.faces[face].len() >= 3);
        }
    }
}
