use std::collections::HashMap;

use slotmap::SecondaryMap;

use crate::math::{Axis, Point3};
use crate::topology::{FaceId, Mesh, VertexId};

/// Coordinates closer than this to the mirror plane are snapped onto it.
const PLANE_EPSILON: f64 = 1e-6;

/// Makes a mesh exactly symmetric about the plane through the origin
/// perpendicular to `axis`.
///
/// The positive half-space wins: faces entirely on the negative side are
/// removed, faces straddling the plane are clipped against it (the cut
/// vertices are shared between neighbours so the mesh stays closed), and
/// faces lying in the plane are dropped. The surviving half is then
/// mirrored with reversed winding so mirrored normals still point out.
///
/// Applying it twice gives the same geometry as applying it once.
pub struct Symmetrize {
    axis: Axis,
}

impl Symmetrize {
    /// Creates a new `Symmetrize` operation.
    #[must_use]
    pub fn new(axis: Axis) -> Self {
        Self { axis }
    }

    /// Executes the operation, returning how many mirrored faces were added.
    pub fn execute(&self, mesh: &mut Mesh) -> usize {
        let axis = self.axis.index();
        self.snap_to_plane(mesh);

        let mut cuts: HashMap<(VertexId, VertexId), VertexId> = HashMap::new();
        for face in mesh.face_ids() {
            self.clip_face(mesh, face, &mut cuts);
        }
        mesh.remove_loose_vertices();

        let mut mirrored: SecondaryMap<VertexId, VertexId> = SecondaryMap::new();
        let sources: Vec<(VertexId, Point3)> =
            mesh.vertices().map(|(id, v)| (id, v.point)).collect();
        for (id, point) in sources {
            if point[axis] == 0.0 {
                mirrored.insert(id, id);
            } else {
                let mut image = point;
                image[axis] = -image[axis];
                mirrored.insert(id, mesh.add_vertex(image));
            }
        }

        let mut added = 0;
        for face in mesh.face_ids() {
            let Ok(data) = mesh.face(face) else {
                continue;
            };
            let material = data.material;
            let image: Option<Vec<VertexId>> = data
                .vertices
                .iter()
                .rev()
                .map(|&v| mirrored.get(v).copied())
                .collect();
            if let Some(image) = image {
                if mesh.add_face(image, material).is_some() {
                    added += 1;
                }
            }
        }

        tracing::debug!(axis = ?self.axis, added, "mesh symmetrized");
        added
    }

    fn snap_to_plane(&self, mesh: &mut Mesh) {
        let axis = self.axis.index();
        let ids: Vec<VertexId> = mesh.vertices().map(|(id, _)| id).collect();
        for id in ids {
            if let Ok(v) = mesh.vertex_mut(id) {
                if v.point[axis].abs() < PLANE_EPSILON {
                    v.point[axis] = 0.0;
                }
            }
        }
    }

    /// Keeps, clips or removes one face according to which side of the
    /// plane its corners lie on.
    fn clip_face(
        &self,
        mesh: &mut Mesh,
        face: FaceId,
        cuts: &mut HashMap<(VertexId, VertexId), VertexId>,
    ) {
        let axis = self.axis.index();
        let Ok(data) = mesh.face(face) else {
            return;
        };
        let loop_vertices = data.vertices.clone();
        let coords: Vec<f64> = loop_vertices
            .iter()
            .map(|&v| mesh.vertex(v).map_or(0.0, |d| d.point[axis]))
            .collect();

        let any_positive = coords.iter().any(|&c| c > 0.0);
        let any_negative = coords.iter().any(|&c| c < 0.0);
        if !any_positive {
            mesh.remove_face(face);
            return;
        }
        if !any_negative {
            return;
        }

        let n = loop_vertices.len();
        let mut clipped = Vec::with_capacity(n + 2);
        for i in 0..n {
            let j = (i + 1) % n;
            if coords[i] >= 0.0 {
                clipped.push(loop_vertices[i]);
            }
            let crosses =
                (coords[i] > 0.0 && coords[j] < 0.0) || (coords[i] < 0.0 && coords[j] > 0.0);
            if crosses {
                clipped.push(self.cut_vertex(mesh, loop_vertices[i], loop_vertices[j], cuts));
            }
        }

        if !mesh.replace_face_vertices(face, clipped) {
            mesh.remove_face(face);
        }
    }

    /// Vertex where edge `a`-`b` crosses the plane, shared by both faces
    /// along that edge.
    fn cut_vertex(
        &self,
        mesh: &mut Mesh,
        a: VertexId,
        b: VertexId,
        cuts: &mut HashMap<(VertexId, VertexId), VertexId>,
    ) -> VertexId {
        let axis = self.axis.index();
        let key = if a < b { (a, b) } else { (b, a) };
        if let Some(&cut) = cuts.get(&key) {
            return cut;
        }
        let (p, q) = match (mesh.vertex(key.0), mesh.vertex(key.1)) {
            (Ok(p), Ok(q)) => (p.point, q.point),
            _ => return a,
        };
        let t = p[axis] / (p[axis] - q[axis]);
        let mut point = p + (q - p) * t;
        point[axis] = 0.0;
        let cut = mesh.add_vertex(point);
        cuts.insert(key, cut);
        cut
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{self, Point3, Vector3};
    use crate::operations::creation::MakeCube;
    use crate::operations::query::{BoundingBox, IsValid};
    use crate::topology::MaterialTag;
    use approx::assert_relative_eq;

    /// Order-independent description of a mesh's geometry.
    fn canonical(mesh: &Mesh) -> Vec<Vec<[i64; 3]>> {
        let quantize = |p: Point3| {
            #[allow(clippy::cast_possible_truncation)]
            let q = |c: f64| (c * 1e9).round() as i64;
            [q(p.x), q(p.y), q(p.z)]
        };
        let mut faces: Vec<Vec<[i64; 3]>> = mesh
            .face_ids()
            .into_iter()
            .map(|f| {
                let mut pts: Vec<[i64; 3]> =
                    mesh.face_points(f).unwrap().into_iter().map(quantize).collect();
                let start = (0..pts.len()).min_by_key(|&i| pts[i]).unwrap();
                pts.rotate_left(start);
                pts
            })
            .collect();
        faces.sort();
        faces
    }

    #[test]
    fn offset_cube_is_clipped_and_mirrored() {
        let mut mesh = MakeCube::new(2.0).build();
        mesh.transform_all(&math::translation(0.0, 0.5, 0.0));
        Symmetrize::new(Axis::Y).execute(&mut mesh);

        let aabb = BoundingBox::new().execute(&mesh).unwrap();
        assert_relative_eq!(aabb.min, Point3::new(-1.0, -1.5, -1.0), epsilon = 1e-12);
        assert_relative_eq!(aabb.max, Point3::new(1.0, 1.5, 1.0), epsilon = 1e-12);
        assert!(IsValid::new().execute(&mesh));
        for (_, edge) in mesh.edges() {
            assert_eq!(edge.faces.len(), 2);
        }
    }

    #[test]
    fn negative_half_is_overwritten() {
        let mut mesh = MakeCube::new(2.0).build();
        // stretch the -Y side only
        let minus_y: Vec<VertexId> = mesh
            .vertices()
            .filter(|(_, v)| v.point.y < 0.0)
            .map(|(id, _)| id)
            .collect();
        mesh.transform_vertices(&minus_y, &math::translation(0.0, -3.0, 0.0));
        Symmetrize::new(Axis::Y).execute(&mut mesh);

        let aabb = BoundingBox::new().execute(&mesh).unwrap();
        assert!(aabb.is_symmetric_about(Axis::Y, 1e-12));
        assert_relative_eq!(aabb.max.y, 1.0);
    }

    #[test]
    fn mirrored_normals_point_outward() {
        let mut mesh = MakeCube::new(2.0).build();
        mesh.transform_all(&math::translation(0.0, 0.0, 0.25));
        Symmetrize::new(Axis::Z).execute(&mut mesh);
        for id in mesh.face_ids() {
            let n = mesh.face_normal(id).unwrap();
            let c = mesh.face_center(id).unwrap();
            assert!(n.dot(&c.coords) > 0.0);
        }
    }

    #[test]
    fn applying_twice_matches_applying_once() {
        let mut mesh = MakeCube::new(2.0).build();
        mesh.transform_all(&(math::rotation(Axis::Z, 20.0) * math::translation(0.3, 0.4, 0.0)));
        Symmetrize::new(Axis::Y).execute(&mut mesh);
        let once = canonical(&mesh);
        Symmetrize::new(Axis::Y).execute(&mut mesh);
        assert_eq!(canonical(&mesh), once);
    }

    #[test]
    fn materials_survive_the_mirror() {
        let mut mesh = MakeCube::new(2.0).build();
        let plus_x = mesh
            .face_ids()
            .into_iter()
            .find(|&f| mesh.face_normal(f).unwrap().dot(&Vector3::x()) > 0.9)
            .unwrap();
        mesh.set_material(plus_x, MaterialTag::ExhaustBurn);
        Symmetrize::new(Axis::Y).execute(&mut mesh);
        let burns = mesh
            .faces()
            .filter(|(_, f)| f.material == MaterialTag::ExhaustBurn)
            .count();
        assert_eq!(burns, 2);
    }
}
