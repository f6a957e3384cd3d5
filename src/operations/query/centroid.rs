use crate::math::{Point3, Vector3, TOLERANCE};
use crate::topology::Mesh;

/// Computes the translation that moves a mesh's centroid to the origin.
///
/// Uses the signed tetrahedron method over a fan triangulation of every
/// face: each triangle forms a tetrahedron with a reference point, and
/// the volume-weighted average of the tetrahedron centroids is the solid's
/// centroid. Open or flat meshes with no enclosed volume fall back to the
/// vertex average.
///
/// The mesh itself is left untouched; callers apply the offset to the
/// placement of the finished object.
#[derive(Debug, Default)]
pub struct RecenterToCentroid;

impl RecenterToCentroid {
    /// Creates a new `RecenterToCentroid` query.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the query. Returns `None` for a mesh with no vertices.
    #[must_use]
    pub fn execute(&self, mesh: &Mesh) -> Option<Vector3> {
        let centroid = volume_centroid(mesh).or_else(|| vertex_average(mesh))?;
        Some(-centroid.coords)
    }
}

fn volume_centroid(mesh: &Mesh) -> Option<Point3> {
    // Tetrahedra are anchored on an arbitrary vertex to keep magnitudes small.
    let (_, anchor) = mesh.vertices().next()?;
    let reference = anchor.point;

    let mut volume = 0.0;
    let mut weighted = Vector3::zeros();
    for (id, _) in mesh.faces() {
        let Some(points) = mesh.face_points(id) else {
            continue;
        };
        let a = points[0] - reference;
        for pair in points[1..].windows(2) {
            let b = pair[0] - reference;
            let c = pair[1] - reference;
            let v = a.dot(&b.cross(&c)) / 6.0;
            volume += v;
            weighted += (a + b + c) * (v / 4.0);
        }
    }

    if volume.abs() < TOLERANCE {
        return None;
    }
    Some(reference + weighted / volume)
}

#[allow(clippy::cast_precision_loss)]
fn vertex_average(mesh: &Mesh) -> Option<Point3> {
    let count = mesh.vertex_count();
    if count == 0 {
        return None;
    }
    let sum = mesh
        .vertices()
        .fold(Vector3::zeros(), |acc, (_, v)| acc + v.point.coords);
    Some(Point3::from(sum / count as f64))
}
