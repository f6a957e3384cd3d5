use std::f64::consts::TAU;

use crate::math::{self, Matrix4, Point3, TOLERANCE};
use crate::topology::{MaterialTag, Mesh, VertexId};

use super::PrimitiveGeometry;

/// Creates a cone, frustum, cylinder or flat annulus along local Z.
///
/// The first ring sits at `z = -depth / 2` with `radius1`, the second at
/// `z = +depth / 2` with `radius2`. A zero radius collapses that ring to
/// an apex. The whole primitive is then placed by `transform`.
///
/// - `radius1 == radius2` produces a cylinder
/// - `radius1 == 0` produces a pointed cone
/// - `depth == 0` with `cap_ends = false` produces a flat ring
pub struct MakeCone {
    segments: usize,
    radius1: f64,
    radius2: f64,
    depth: f64,
    cap_ends: bool,
    transform: Matrix4,
    material: MaterialTag,
}

impl MakeCone {
    /// Creates a new capped `MakeCone` operation at the origin.
    #[must_use]
    pub fn new(segments: usize, radius1: f64, radius2: f64, depth: f64) -> Self {
        Self {
            segments,
            radius1,
            radius2,
            depth,
            cap_ends: true,
            transform: Matrix4::identity(),
            material: MaterialTag::Hull,
        }
    }

    /// Sets whether the non-apex ends are closed with n-gon caps.
    #[must_use]
    pub fn cap_ends(mut self, cap_ends: bool) -> Self {
        self.cap_ends = cap_ends;
        self
    }

    /// Sets the placement transform.
    #[must_use]
    pub fn transform(mut self, transform: Matrix4) -> Self {
        self.transform = transform;
        self
    }

    /// Sets the material of every created face.
    #[must_use]
    pub fn material(mut self, material: MaterialTag) -> Self {
        self.material = material;
        self
    }

    /// Adds the primitive to `mesh`.
    ///
    /// Fewer than 3 segments, a negative radius, or two zero radii add
    /// nothing.
    pub fn execute(&self, mesh: &mut Mesh) -> PrimitiveGeometry {
        let degenerate = self.segments < 3
            || self.radius1 < 0.0
            || self.radius2 < 0.0
            || (self.radius1 < TOLERANCE && self.radius2 < TOLERANCE);
        if degenerate {
            tracing::trace!(
                segments = self.segments,
                radius1 = self.radius1,
                radius2 = self.radius2,
                "skipping degenerate cone"
            );
            return PrimitiveGeometry::default();
        }

        let mut geometry = PrimitiveGeometry::default();
        let half = self.depth * 0.5;
        let bottom = self.ring(mesh, self.radius1, -half, &mut geometry.vertices);
        let top = self.ring(mesh, self.radius2, half, &mut geometry.vertices);

        let flat_tube = self.depth.abs() < TOLERANCE && (self.radius1 - self.radius2).abs() < TOLERANCE;
        if !flat_tube {
            let n = self.segments;
            for k in 0..n {
                let next = (k + 1) % n;
                let side = vec![
                    bottom.at(k),
                    bottom.at(next),
                    top.at(next),
                    top.at(k),
                ];
                if let Some(f) = mesh.add_face(side, self.material) {
                    geometry.faces.push(f);
                }
            }
        }

        if self.cap_ends {
            if let Ring::Loop(ring) = &bottom {
                if !flat_tube {
                    let cap: Vec<VertexId> = ring.iter().rev().copied().collect();
                    geometry.faces.extend(mesh.add_face(cap, self.material));
                }
            }
            if let Ring::Loop(ring) = &top {
                geometry.faces.extend(mesh.add_face(ring.clone(), self.material));
            }
        }

        geometry
    }

    #[allow(clippy::cast_precision_loss)]
    fn ring(&self, mesh: &mut Mesh, radius: f64, z: f64, created: &mut Vec<VertexId>) -> Ring {
        if radius < TOLERANCE {
            let apex = mesh.add_vertex(math::transform_point(&self.transform, &Point3::new(0.0, 0.0, z)));
            created.push(apex);
            return Ring::Apex(apex);
        }
        let ring: Vec<VertexId> = (0..self.segments)
            .map(|k| {
                let phi = TAU * k as f64 / self.segments as f64;
                let local = Point3::new(radius * phi.cos(), radius * phi.sin(), z);
                mesh.add_vertex(math::transform_point(&self.transform, &local))
            })
            .collect();
        created.extend_from_slice(&ring);
        Ring::Loop(ring)
    }
}

/// One end of the primitive: a full ring or a single apex vertex.
enum Ring {
    Loop(Vec<VertexId>),
    Apex(VertexId),
}

impl Ring {
    fn at(&self, k: usize) -> VertexId {
        match self {
            Ring::Loop(ring) => ring[k],
            Ring::Apex(apex) => *apex,
        }
    }
}
