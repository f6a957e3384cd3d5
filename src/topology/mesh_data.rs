use serde::{Deserialize, Serialize};

use crate::math::{self, Point3, Vector3};
use crate::operations::query::Aabb;

use super::MaterialTag;

/// A frozen, compact polygon mesh ready for handoff to a renderer.
///
/// Faces index into `positions`; `materials` runs parallel to `faces`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    /// Vertex positions.
    pub positions: Vec<[f64; 3]>,
    /// Boundary loops, counter-clockwise seen from outside.
    pub faces: Vec<Vec<u32>>,
    /// Material tag per face.
    pub materials: Vec<MaterialTag>,
}

impl MeshData {
    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Position of vertex `index`.
    #[must_use]
    pub fn point(&self, index: u32) -> Option<Point3> {
        self.positions
            .get(index as usize)
            .map(|&[x, y, z]| Point3::new(x, y, z))
    }

    /// Positions of face `face`'s boundary loop.
    #[must_use]
    pub fn face_points(&self, face: usize) -> Option<Vec<Point3>> {
        self.faces
            .get(face)?
            .iter()
            .map(|&i| self.point(i))
            .collect()
    }

    /// Unit normal of face `face`, or `None` if it has no area.
    #[must_use]
    pub fn face_normal(&self, face: usize) -> Option<Vector3> {
        math::polygon_normal(&self.face_points(face)?)
    }

    /// Number of faces carrying `tag`.
    #[must_use]
    pub fn count_material(&self, tag: MaterialTag) -> usize {
        self.materials.iter().filter(|&&m| m == tag).count()
    }

    /// Axis-aligned bounds of all vertices, `None` for an empty mesh.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(self.positions.iter().map(|&[x, y, z]| Point3::new(x, y, z)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tetra() -> MeshData {
        MeshData {
            positions: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0],
            ],
            faces: vec![vec![0, 2, 1], vec![0, 1, 3], vec![0, 3, 2], vec![1, 2, 3]],
            materials: vec![
                MaterialTag::Hull,
                MaterialTag::Hull,
                MaterialTag::GlowDisc,
                MaterialTag::Hull,
            ],
        }
    }

    #[test]
    fn normals_point_out_of_the_tetrahedron() {
        let mesh = tetra();
        assert!((mesh.face_normal(0).unwrap() - -Vector3::z()).norm() < 1e-12);
        assert!((mesh.face_normal(1).unwrap() - -Vector3::y()).norm() < 1e-12);
        assert!(mesh.face_normal(3).unwrap().dot(&Vector3::new(1.0, 1.0, 1.0)) > 0.0);
        assert!(mesh.face_normal(9).is_none());
    }

    #[test]
    fn bounds_and_material_counts() {
        let mesh = tetra();
        let aabb = mesh.bounding_box().unwrap();
        assert_eq!(aabb.min, Point3::origin());
        assert_eq!(aabb.max, Point3::new(1.0, 1.0, 1.0));
        assert_eq!(mesh.count_material(MaterialTag::GlowDisc), 1);
        assert!(MeshData::default().bounding_box().is_none());
    }
}
