use crate::math::{Point3, TOLERANCE};
use crate::topology::{MaterialTag, Mesh, VertexId};

use super::PrimitiveGeometry;

/// Corner order: bottom ring (z = -h) then top ring (z = +h), both
/// counter-clockwise seen from +Z.
const CORNERS: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Quads wound so their normals point away from the center.
const QUADS: [[usize; 4]; 6] = [
    [0, 4, 7, 3], // -X
    [1, 2, 6, 5], // +X
    [0, 1, 5, 4], // -Y
    [3, 7, 6, 2], // +Y
    [0, 3, 2, 1], // -Z
    [4, 5, 6, 7], // +Z
];

/// Creates an axis-aligned cube centered on the origin.
pub struct MakeCube {
    size: f64,
}

impl MakeCube {
    /// Creates a new `MakeCube` operation with edge length `size`.
    #[must_use]
    pub fn new(size: f64) -> Self {
        Self { size }
    }

    /// Builds a fresh mesh holding only the cube.
    #[must_use]
    pub fn build(&self) -> Mesh {
        let mut mesh = Mesh::new();
        self.execute(&mut mesh);
        mesh
    }

    /// Adds the cube's 8 vertices and 6 quads to `mesh`.
    ///
    /// A non-positive size adds nothing.
    pub fn execute(&self, mesh: &mut Mesh) -> PrimitiveGeometry {
        if self.size < TOLERANCE {
            tracing::trace!(size = self.size, "skipping degenerate cube");
            return PrimitiveGeometry::default();
        }

        let h = self.size * 0.5;
        let vertices: Vec<VertexId> = CORNERS
            .iter()
            .map(|c| mesh.add_vertex(Point3::new(c[0] * h, c[1] * h, c[2] * h)))
            .collect();

        let faces = QUADS
            .iter()
            .filter_map(|q| {
                mesh.add_face(q.iter().map(|&i| vertices[i]).collect(), MaterialTag::Hull)
            })
            .collect();

        PrimitiveGeometry { faces, vertices }
    }
}
