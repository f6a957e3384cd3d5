use crate::topology::{FaceId, Mesh, VertexId};

/// Result of a face extrusion.
#[derive(Debug, Clone)]
pub struct ExtrudedFace {
    /// The translated cap, replacing the input face.
    pub face: FaceId,
    /// One side quad per boundary edge, in boundary order.
    pub sides: Vec<FaceId>,
}

/// Extrudes a face along its outward normal.
///
/// The boundary loop is duplicated and translated by `distance`; the
/// input face is removed and replaced by the translated cap, and one
/// quad per boundary edge stitches the old loop to the new one. The cap
/// and the sides inherit the input face's material.
///
/// A negative distance extrudes into the surface, and zero leaves the
/// cap in place with zero-area sides until the cap is scaled.
pub struct Extrude {
    face: FaceId,
    distance: f64,
}

impl Extrude {
    /// Creates a new `Extrude` operation.
    #[must_use]
    pub fn new(face: FaceId, distance: f64) -> Self {
        Self { face, distance }
    }

    /// Executes the extrusion.
    ///
    /// Returns `None` and leaves the mesh untouched when the face handle
    /// is stale or the face has no normal.
    pub fn execute(&self, mesh: &mut Mesh) -> Option<ExtrudedFace> {
        let Some(normal) = mesh.face_normal(self.face) else {
            tracing::trace!(face = ?self.face, "skipping extrude of stale or degenerate face");
            return None;
        };
        let source = mesh.remove_face(self.face)?;

        let offset = normal * self.distance;
        let mut lifted: Vec<VertexId> = Vec::with_capacity(source.vertices.len());
        for &v in &source.vertices {
            let point = mesh.vertex(v).ok()?.point;
            lifted.push(mesh.add_vertex(point + offset));
        }

        let face = mesh.add_face(lifted.clone(), source.material)?;

        let n = source.vertices.len();
        let mut sides = Vec::with_capacity(n);
        for i in 0..n {
            let j = (i + 1) % n;
            let quad = vec![source.vertices[i], source.vertices[j], lifted[j], lifted[i]];
            if let Some(side) = mesh.add_face(quad, source.material) {
                sides.push(side);
            }
        }

        Some(ExtrudedFace { face, sides })
    }
}

/// Extrudes `face` by `distance` and returns only the new cap.
pub(crate) fn extrude_cap(mesh: &mut Mesh, face: FaceId, distance: f64) -> Option<FaceId> {
    Extrude::new(face, distance).execute(mesh).map(|e| e.face)
}
