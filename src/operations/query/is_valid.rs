use crate::topology::Mesh;

/// Validates the topological and geometric consistency of a mesh.
///
/// A mesh is valid when:
/// - every face has at least 3 live vertices and a non-zero area
/// - every edge joins two distinct live vertices
/// - every face an edge lists is live and actually uses that edge
///
/// Manifoldness is not checked.
#[derive(Debug, Default)]
pub struct IsValid;

impl IsValid {
    /// Creates a new `IsValid` query.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the validation, returning `true` if the mesh is valid.
    #[must_use]
    pub fn execute(&self, mesh: &Mesh) -> bool {
        for (id, face) in mesh.faces() {
            if face.vertices.len() < 3 {
                tracing::trace!(?id, "face with fewer than 3 corners");
                return false;
            }
            if mesh.face_normal(id).is_none() {
                tracing::trace!(?id, "face without a normal");
                return false;
            }
        }

        for (id, edge) in mesh.edges() {
            let [a, b] = edge.vertices;
            if a == b || mesh.vertex(a).is_err() || mesh.vertex(b).is_err() {
                tracing::trace!(?id, "edge with bad endpoints");
                return false;
            }
            for &f in &edge.faces {
                let Ok(face) = mesh.face(f) else {
                    tracing::trace!(?id, "edge lists a stale face");
                    return false;
                };
                let n = face.vertices.len();
                let uses_edge = (0..n).any(|i| {
                    mesh.edge_between(face.vertices[i], face.vertices[(i + 1) % n]) == Some(id)
                });
                if !uses_edge {
                    tracing::trace!(?id, "edge lists a face that does not use it");
                    return false;
                }
            }
        }

        true
    }
}
