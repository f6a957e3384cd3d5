pub mod edge;
pub mod face;
pub mod mesh_data;
pub mod vertex;

pub use edge::{EdgeData, EdgeId};
pub use face::{FaceData, FaceId, MaterialTag};
pub use mesh_data::MeshData;
pub use vertex::{VertexData, VertexId};

use std::collections::HashMap;

use slotmap::{SecondaryMap, SlotMap};

use crate::error::TopologyError;
use crate::math::{self, Matrix4, Point3, Vector3};

use edge::edge_key;

/// Central arena that owns all mesh entities.
///
/// Entities reference each other via typed IDs (generational indices).
/// A handle to a removed face never resolves again, even after its slot
/// has been recycled for new geometry.
#[derive(Debug, Default, Clone)]
pub struct Mesh {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    faces: SlotMap<FaceId, FaceData>,
    edge_index: HashMap<(VertexId, VertexId), EdgeId>,
}

impl Mesh {
    /// Creates a new, empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex operations ---

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, point: Point3) -> VertexId {
        self.vertices.insert(VertexData::from(point))
    }

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        self.vertices
            .get(id)
            .ok_or(TopologyError::StaleHandle("vertex"))
    }

    /// Returns a mutable reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale.
    pub fn vertex_mut(&mut self, id: VertexId) -> Result<&mut VertexData, TopologyError> {
        self.vertices
            .get_mut(id)
            .ok_or(TopologyError::StaleHandle("vertex"))
    }

    /// Number of live vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Iterates over all live vertices in arena order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &VertexData)> {
        self.vertices.iter()
    }

    // --- Edge operations ---

    /// Returns a reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        self.edges.get(id).ok_or(TopologyError::StaleHandle("edge"))
    }

    /// Returns the edge joining `a` and `b`, if one exists.
    #[must_use]
    pub fn edge_between(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.edge_index.get(&edge_key(a, b)).copied()
    }

    /// Number of live edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over all live edges in arena order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeData)> {
        self.edges.iter()
    }

    // --- Face operations ---

    /// Inserts a face over an existing vertex loop and links its edges.
    ///
    /// Consecutive repeated handles are collapsed. Returns `None` when the
    /// loop references a stale vertex or has fewer than three distinct
    /// corners.
    pub fn add_face(&mut self, vertices: Vec<VertexId>, material: MaterialTag) -> Option<FaceId> {
        let vertices = self.clean_loop(vertices)?;
        let id = self.faces.insert(FaceData {
            vertices,
            material,
        });
        self.link_face(id);
        Some(id)
    }

    /// Removes a face and unlinks it from its edges.
    ///
    /// Vertices are left in place; see [`Mesh::remove_loose_vertices`].
    pub fn remove_face(&mut self, id: FaceId) -> Option<FaceData> {
        if !self.faces.contains_key(id) {
            return None;
        }
        self.unlink_face(id);
        self.faces.remove(id)
    }

    /// Replaces a face's boundary loop, keeping its handle and material.
    ///
    /// Returns `false` (and leaves the face untouched) when the new loop
    /// is invalid.
    pub fn replace_face_vertices(&mut self, id: FaceId, vertices: Vec<VertexId>) -> bool {
        if !self.faces.contains_key(id) {
            return false;
        }
        let Some(vertices) = self.clean_loop(vertices) else {
            return false;
        };
        self.unlink_face(id);
        if let Some(face) = self.faces.get_mut(id) {
            face.vertices = vertices;
        }
        self.link_face(id);
        true
    }

    /// Returns a reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale.
    pub fn face(&self, id: FaceId) -> Result<&FaceData, TopologyError> {
        self.faces.get(id).ok_or(TopologyError::StaleHandle("face"))
    }

    /// Returns `true` if the handle still resolves to a live face.
    #[must_use]
    pub fn contains_face(&self, id: FaceId) -> bool {
        self.faces.contains_key(id)
    }

    /// Sets the material of a live face. Stale handles are ignored.
    pub fn set_material(&mut self, id: FaceId, material: MaterialTag) {
        if let Some(face) = self.faces.get_mut(id) {
            face.material = material;
        }
    }

    /// Number of live faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Snapshot of all live face handles in arena order.
    #[must_use]
    pub fn face_ids(&self) -> Vec<FaceId> {
        self.faces.keys().collect()
    }

    /// Iterates over all live faces in arena order.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &FaceData)> {
        self.faces.iter()
    }

    /// Positions of a face's boundary loop.
    #[must_use]
    pub fn face_points(&self, id: FaceId) -> Option<Vec<Point3>> {
        let face = self.faces.get(id)?;
        face.vertices
            .iter()
            .map(|&v| self.vertices.get(v).map(|data| data.point))
            .collect()
    }

    /// Positions of the face's geometric corners, skipping vertices that
    /// lie on a straight side.
    #[must_use]
    pub fn face_corners(&self, id: FaceId) -> Option<Vec<Point3>> {
        let points = self.face_points(id)?;
        Some(
            math::corner_indices(&points)
                .into_iter()
                .map(|i| points[i])
                .collect(),
        )
    }

    /// Outward unit normal of a face, or `None` for stale or zero-area faces.
    #[must_use]
    pub fn face_normal(&self, id: FaceId) -> Option<Vector3> {
        math::polygon_normal(&self.face_points(id)?)
    }

    /// Center of the face's axis-aligned bounds.
    #[must_use]
    pub fn face_center(&self, id: FaceId) -> Option<Point3> {
        let points = self.face_points(id)?;
        Some(math::bounds_center(&points))
    }

    /// Area of a face (exact for planar loops).
    #[must_use]
    pub fn face_area(&self, id: FaceId) -> Option<f64> {
        let points = self.face_points(id)?;
        Some(math::newell(&points).norm() * 0.5)
    }

    /// Faces other than `exclude` that share the edge `a`-`b`.
    #[must_use]
    pub fn faces_around_edge(&self, a: VertexId, b: VertexId, exclude: FaceId) -> Vec<FaceId> {
        self.edge_between(a, b)
            .and_then(|e| self.edges.get(e))
            .map(|edge| {
                let mut faces: Vec<FaceId> = Vec::with_capacity(edge.faces.len());
                for &f in &edge.faces {
                    if f != exclude && !faces.contains(&f) {
                        faces.push(f);
                    }
                }
                faces
            })
            .unwrap_or_default()
    }

    // --- Bulk operations ---

    /// Applies a transform to the given vertices. Stale handles are skipped.
    pub fn transform_vertices(&mut self, ids: &[VertexId], matrix: &Matrix4) {
        for &id in ids {
            if let Some(v) = self.vertices.get_mut(id) {
                v.point = math::transform_point(matrix, &v.point);
            }
        }
    }

    /// Applies a transform to every vertex.
    pub fn transform_all(&mut self, matrix: &Matrix4) {
        for v in self.vertices.values_mut() {
            v.point = math::transform_point(matrix, &v.point);
        }
    }

    /// Removes vertices no face refers to. Returns how many were removed.
    pub fn remove_loose_vertices(&mut self) -> usize {
        let mut used: SecondaryMap<VertexId, ()> = SecondaryMap::new();
        for face in self.faces.values() {
            for &v in &face.vertices {
                used.insert(v, ());
            }
        }
        let before = self.vertices.len();
        self.vertices.retain(|id, _| used.contains_key(id));
        before - self.vertices.len()
    }

    /// Removes faces with no area. Returns how many were removed.
    pub fn remove_degenerate_faces(&mut self) -> usize {
        let degenerate: Vec<FaceId> = self
            .faces
            .keys()
            .filter(|&f| self.face_normal(f).is_none())
            .collect();
        for &f in &degenerate {
            self.remove_face(f);
        }
        degenerate.len()
    }

    /// Compacts the mesh into plain index buffers.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_mesh_data(&self) -> MeshData {
        let mut index: SecondaryMap<VertexId, u32> = SecondaryMap::new();
        let mut positions = Vec::with_capacity(self.vertices.len());
        for (id, v) in &self.vertices {
            index.insert(id, positions.len() as u32);
            positions.push([v.point.x, v.point.y, v.point.z]);
        }

        let mut faces = Vec::with_capacity(self.faces.len());
        let mut materials = Vec::with_capacity(self.faces.len());
        for face in self.faces.values() {
            let loop_indices: Option<Vec<u32>> =
                face.vertices.iter().map(|&v| index.get(v).copied()).collect();
            if let Some(loop_indices) = loop_indices {
                faces.push(loop_indices);
                materials.push(face.material);
            }
        }

        MeshData {
            positions,
            faces,
            materials,
        }
    }

    // --- Internal helpers ---

    fn clean_loop(&self, vertices: Vec<VertexId>) -> Option<Vec<VertexId>> {
        if vertices.iter().any(|&v| !self.vertices.contains_key(v)) {
            return None;
        }
        let mut cleaned: Vec<VertexId> = Vec::with_capacity(vertices.len());
        for v in vertices {
            if cleaned.last() != Some(&v) {
                cleaned.push(v);
            }
        }
        while cleaned.len() > 1 && cleaned.first() == cleaned.last() {
            cleaned.pop();
        }
        (cleaned.len() >= 3).then_some(cleaned)
    }

    fn link_face(&mut self, id: FaceId) {
        let Some(face) = self.faces.get(id) else {
            return;
        };
        let loop_vertices = face.vertices.clone();
        let n = loop_vertices.len();
        for i in 0..n {
            let a = loop_vertices[i];
            let b = loop_vertices[(i + 1) % n];
            let key = edge_key(a, b);
            let edge_id = match self.edge_index.get(&key) {
                Some(&e) => e,
                None => {
                    let e = self.edges.insert(EdgeData {
                        vertices: [a, b],
                        faces: Vec::with_capacity(2),
                    });
                    self.edge_index.insert(key, e);
                    e
                }
            };
            if let Some(edge) = self.edges.get_mut(edge_id) {
                edge.faces.push(id);
            }
        }
    }

    fn unlink_face(&mut self, id: FaceId) {
        let Some(face) = self.faces.get(id) else {
            return;
        };
        let loop_vertices = face.vertices.clone();
        let n = loop_vertices.len();
        for i in 0..n {
            let key = edge_key(loop_vertices[i], loop_vertices[(i + 1) % n]);
            let Some(&edge_id) = self.edge_index.get(&key) else {
                continue;
            };
            let orphaned = match self.edges.get_mut(edge_id) {
                Some(edge) => {
                    edge.faces.retain(|&f| f != id);
                    edge.faces.is_empty()
                }
                None => false,
            };
            if orphaned {
                self.edges.remove(edge_id);
                self.edge_index.remove(&key);
            }
        }
    }
}
