mod tessellate_mesh;

pub use tessellate_mesh::TessellateMesh;

use serde::{Deserialize, Serialize};

use crate::math::{Point3, Vector3};
use crate::topology::MaterialTag;

/// An indexed triangle mesh with flat per-triangle attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
    /// Unit normal of the polygon each triangle came from.
    pub normals: Vec<Vector3>,
    /// Material tag of the polygon each triangle came from.
    pub materials: Vec<MaterialTag>,
}

impl TriangleMesh {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Total surface area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.indices
            .iter()
            .map(|&[a, b, c]| {
                let (a, b, c) = (
                    self.vertices[a as usize],
                    self.vertices[b as usize],
                    self.vertices[c as usize],
                );
                (b - a).cross(&(c - a)).norm() * 0.5
            })
            .sum()
    }
}
