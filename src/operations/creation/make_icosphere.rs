use std::collections::HashMap;

use crate::math::{self, Matrix4, Point3, Vector3, TOLERANCE};
use crate::topology::{MaterialTag, Mesh, VertexId};

use super::PrimitiveGeometry;

/// Creates a geodesic sphere by recursively splitting an icosahedron.
///
/// Each subdivision splits every triangle into four and pushes the new
/// midpoints back onto the sphere: 0 subdivisions is the bare
/// icosahedron (20 faces), 2 gives 320 faces.
pub struct MakeIcosphere {
    subdivisions: u32,
    radius: f64,
    transform: Matrix4,
    material: MaterialTag,
}

impl MakeIcosphere {
    /// Creates a new `MakeIcosphere` operation centered on the origin.
    #[must_use]
    pub fn new(subdivisions: u32, radius: f64) -> Self {
        Self {
            subdivisions,
            radius,
            transform: Matrix4::identity(),
            material: MaterialTag::Hull,
        }
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

    /// Adds the sphere to `mesh`. A non-positive radius adds nothing.
    pub fn execute(&self, mesh: &mut Mesh) -> PrimitiveGeometry {
        if self.radius < TOLERANCE {
            tracing::trace!(radius = self.radius, "skipping degenerate icosphere");
            return PrimitiveGeometry::default();
        }

        let (mut points, mut triangles) = icosahedron();
        for _ in 0..self.subdivisions {
            triangles = split(&mut points, &triangles);
        }

        let vertices: Vec<VertexId> = points
            .iter()
            .map(|dir| {
                let local = Point3::from(dir * self.radius);
                mesh.add_vertex(math::transform_point(&self.transform, &local))
            })
            .collect();

        let faces = triangles
            .iter()
            .filter_map(|t| mesh.add_face(t.iter().map(|&i| vertices[i]).collect(), self.material))
            .collect();

        PrimitiveGeometry { faces, vertices }
    }
}

/// Unit icosahedron, faces wound counter-clockwise from outside.
fn icosahedron() -> (Vec<Vector3>, Vec<[usize; 3]>) {
    let t = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let points = [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ]
    .iter()
    .map(|&[x, y, z]| Vector3::new(x, y, z).normalize())
    .collect();

    let triangles = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    (points, triangles)
}

/// Splits every triangle into four, sharing midpoints between neighbours.
fn split(points: &mut Vec<Vector3>, triangles: &[[usize; 3]]) -> Vec<[usize; 3]> {
    let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();
    let mut midpoint = |a: usize, b: usize, points: &mut Vec<Vector3>| -> usize {
        let key = if a < b { (a, b) } else { (b, a) };
        *midpoints.entry(key).or_insert_with(|| {
            points.push(((points[a] + points[b]) * 0.5).normalize());
            points.len() - 1
        })
    };

    let mut out = Vec::with_capacity(triangles.len() * 4);
    for &[a, b, c] in triangles {
        let ab = midpoint(a, b, points);
        let bc = midpoint(b, c, points);
        let ca = midpoint(c, a, points);
        out.push([a, ab, ca]);
        out.push([b, bc, ab]);
        out.push([c, ca, bc]);
        out.push([ab, bc, ca]);
    }
    out
}
