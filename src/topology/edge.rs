use super::face::FaceId;
use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for an edge in the mesh.
    pub struct EdgeId;
}

/// Data associated with a mesh edge.
///
/// Edges are undirected and shared by the faces on either side of them
/// (winged-edge style). A closed manifold region gives every edge exactly
/// two faces; generation tolerates the occasional non-manifold edge with
/// more, and open boundaries with one.
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// The two endpoints, in the order the edge was first created.
    pub vertices: [VertexId; 2],
    /// Faces whose boundary loop runs along this edge.
    pub faces: Vec<FaceId>,
}

/// Lookup key for the undirected edge between two vertices.
pub(crate) fn edge_key(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
