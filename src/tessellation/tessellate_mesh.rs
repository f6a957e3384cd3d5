use crate::math::{Point3, TOLERANCE};
use crate::topology::MeshData;

use super::TriangleMesh;

/// Fan-triangulates every polygon of a [`MeshData`].
///
/// Polygons are convex in practice (n-gons only arise from collinear
/// points spliced into quad edges), so a fan from the first corner
/// covers them exactly. Slivers with no area are dropped, as are faces
/// without a normal.
pub struct TessellateMesh<'a> {
    mesh: &'a MeshData,
}

impl<'a> TessellateMesh<'a> {
    /// Creates a new `TessellateMesh` operation.
    #[must_use]
    pub fn new(mesh: &'a MeshData) -> Self {
        Self { mesh }
    }

    /// Executes the tessellation.
    #[must_use]
    pub fn execute(&self) -> TriangleMesh {
        let mut out = TriangleMesh {
            vertices: self
                .mesh
                .positions
                .iter()
                .map(|&[x, y, z]| Point3::new(x, y, z))
                .collect(),
            ..TriangleMesh::default()
        };

        for (index, (face, &material)) in self
            .mesh
            .faces
            .iter()
            .zip(&self.mesh.materials)
            .enumerate()
        {
            let Some(normal) = self.mesh.face_normal(index) else {
                continue;
            };
            let anchor = face[0];
            for pair in face[1..].windows(2) {
                let tri = [anchor, pair[0], pair[1]];
                let [a, b, c] = tri.map(|i| out.vertices[i as usize]);
                if (b - a).cross(&(c - a)).norm() < TOLERANCE {
                    continue;
                }
                out.indices.push(tri);
                out.normals.push(normal);
                out.materials.push(material);
            }
        }

        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use crate::operations::creation::MakeCube;
    use crate::operations::shaping::SubdivideGrid;
    use crate::topology::{MaterialTag, Mesh};
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn cube_becomes_twelve_triangles() {
        let data = MakeCube::new(2.0).build().to_mesh_data();
        let tris = TessellateMesh::new(&data).execute();
        assert_eq!(tris.triangle_count(), 12);
        assert_eq!(tris.normals.len(), 12);
        assert_relative_eq!(tris.area(), 24.0, epsilon = 1e-12);
        assert!(tris.materials.iter().all(|&m| m == MaterialTag::Hull));
    }

    #[test]
    fn triangles_keep_polygon_winding() {
        let data = MakeCube::new(2.0).build().to_mesh_data();
        let tris = TessellateMesh::new(&data).execute();
        for (tri, normal) in tris.indices.iter().zip(&tris.normals) {
            let [a, b, c] = tri.map(|i| tris.vertices[i as usize]);
            let n = (b - a).cross(&(c - a)).normalize();
            assert_relative_eq!(n, *normal, epsilon = 1e-12);
        }
    }

    #[test]
    fn spliced_ngons_cover_their_full_area() {
        let mut mesh = MakeCube::new(2.0).build();
        let top = mesh
            .face_ids()
            .into_iter()
            .find(|&f| mesh.face_normal(f).unwrap().dot(&Vector3::z()) > 0.9)
            .unwrap();
        SubdivideGrid::new(top, 3).execute(&mut mesh, &mut Pcg64::seed_from_u64(0));
        let data = mesh.to_mesh_data();
        let tris = TessellateMesh::new(&data).execute();
        assert_relative_eq!(tris.area(), 24.0, epsilon = 1e-9);
        let empty: Mesh = Mesh::new();
        assert_eq!(TessellateMesh::new(&empty.to_mesh_data()).execute().triangle_count(), 0);
    }
}
