use nalgebra::Matrix3;

use crate::math::{Matrix4, Point3, Vector3, TOLERANCE};
use crate::topology::{FaceId, Mesh};

/// Orthonormal coordinate frame derived from a face.
///
/// - `x_axis` follows the side from the face's first corner to its second
/// - `z_axis` is the negated outward normal, pointing into the surface
/// - `y_axis` completes a right-handed basis
/// - `origin` defaults to the center of the face's bounds
///
/// Everything placed "on a face" (cones, spheres, antennas) and every
/// face-local scale goes through this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceFrame {
    /// Local X, along the first side.
    pub x_axis: Vector3,
    /// Local Y, `z_axis × x_axis`.
    pub y_axis: Vector3,
    /// Local Z, the negated face normal.
    pub z_axis: Vector3,
    /// Frame origin in world space.
    pub origin: Point3,
}

impl FaceFrame {
    /// Frame of `face` centered on its bounds. `None` for stale or
    /// degenerate faces.
    #[must_use]
    pub fn new(mesh: &Mesh, face: FaceId) -> Option<Self> {
        let center = mesh.face_center(face)?;
        Self::at(mesh, face, center)
    }

    /// Frame of `face` with its origin moved to `origin`.
    #[must_use]
    pub fn at(mesh: &Mesh, face: FaceId, origin: Point3) -> Option<Self> {
        let corners = mesh.face_corners(face)?;
        let normal = mesh.face_normal(face)?;
        let z_axis = -normal;

        let edge = *corners.get(1)? - *corners.first()?;
        let x_axis = (edge - z_axis * edge.dot(&z_axis)).try_normalize(TOLERANCE)?;
        let y_axis = z_axis.cross(&x_axis);

        Some(Self {
            x_axis,
            y_axis,
            z_axis,
            origin,
        })
    }

    /// Local-to-world transform.
    #[must_use]
    pub fn matrix(&self) -> Matrix4 {
        Matrix4::from_columns(&[
            self.x_axis.push(0.0),
            self.y_axis.push(0.0),
            self.z_axis.push(0.0),
            self.origin.coords.push(1.0),
        ])
    }

    /// World-to-local transform.
    #[must_use]
    pub fn inverse(&self) -> Matrix4 {
        let rt = Matrix3::from_columns(&[self.x_axis, self.y_axis, self.z_axis]).transpose();
        let t = -(rt * self.origin.coords);
        rt.to_homogeneous().append_translation(&t)
    }
}

/// Local frame matrix of `face`, optionally re-centered on `position`.
#[must_use]
pub fn local_frame(mesh: &Mesh, face: FaceId, position: Option<Point3>) -> Option<Matrix4> {
    let frame = match position {
        Some(origin) => FaceFrame::at(mesh, face, origin)?,
        None => FaceFrame::new(mesh, face)?,
    };
    Some(frame.matrix())
}

/// Approximates a face as a rectangle: the lengths of the sides from
/// corner 0 to corner 1 and from corner 1 to corner 2. Vertices spliced
/// into a side do not count as corners. Returns `(-1.0, -1.0)` for stale
/// faces and triangles.
#[must_use]
pub fn width_height(mesh: &Mesh, face: FaceId) -> (f64, f64) {
    match mesh.face_corners(face) {
        Some(c) if c.len() >= 4 => ((c[0] - c[1]).norm(), (c[2] - c[1]).norm()),
        _ => (-1.0, -1.0),
    }
}

/// Ratio of the first two side lengths, normalized to be `>= 1`.
/// Stale or degenerate faces report `1.0`.
#[must_use]
pub fn aspect_ratio(mesh: &Mesh, face: FaceId) -> f64 {
    let p = match mesh.face_corners(face) {
        Some(p) if p.len() >= 3 => p,
        _ => return 1.0,
    };
    let e0 = (p[1] - p[0]).norm();
    let e1 = (p[2] - p[1]).norm();
    if e1 < TOLERANCE {
        return 1.0;
    }
    let ratio = (e0 / e1).max(0.01);
    if ratio < 1.0 {
        1.0 / ratio
    } else {
        ratio
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math;
    use crate::topology::{MaterialTag, VertexId};
    use approx::assert_relative_eq;

    fn rect(mesh: &mut Mesh, w: f64, h: f64) -> FaceId {
        let verts: Vec<VertexId> = [
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(w, 0.0, 1.0),
            Point3::new(w, h, 1.0),
            Point3::new(0.0, h, 1.0),
        ]
        .into_iter()
        .map(|p| mesh.add_vertex(p))
        .collect();
        mesh.add_face(verts, MaterialTag::Hull).unwrap()
    }

    #[test]
    fn frame_axes_follow_edge_and_normal() {
        let mut mesh = Mesh::new();
        let face = rect(&mut mesh, 2.0, 1.0);
        let frame = FaceFrame::new(&mesh, face).unwrap();
        assert_relative_eq!(frame.x_axis, Vector3::x());
        assert_relative_eq!(frame.z_axis, -Vector3::z());
        assert_relative_eq!(frame.y_axis, -Vector3::y());
        assert_relative_eq!(frame.origin, Point3::new(1.0, 0.5, 1.0));
        assert_relative_eq!(frame.x_axis.cross(&frame.y_axis), frame.z_axis, epsilon = 1e-12);
    }

    #[test]
    fn inverse_undoes_matrix() {
        let mut mesh = Mesh::new();
        let face = rect(&mut mesh, 2.0, 1.0);
        let verts = mesh.face(face).unwrap().vertices.clone();
        mesh.transform_vertices(&verts, &math::rotation(math::Axis::X, 30.0));
        let frame = FaceFrame::new(&mesh, face).unwrap();
        let round = frame.inverse() * frame.matrix();
        assert_relative_eq!(round, Matrix4::identity(), epsilon = 1e-12);

        let local_origin = math::transform_point(&frame.inverse(), &frame.origin);
        assert_relative_eq!(local_origin, Point3::origin(), epsilon = 1e-12);
    }

    #[test]
    fn position_override_moves_origin_only() {
        let mut mesh = Mesh::new();
        let face = rect(&mut mesh, 2.0, 1.0);
        let m = local_frame(&mesh, face, Some(Point3::new(5.0, 5.0, 5.0))).unwrap();
        let p = math::transform_point(&m, &Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(6.0, 5.0, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn width_height_and_aspect() {
        let mut mesh = Mesh::new();
        let face = rect(&mut mesh, 1.0, 4.0);
        assert_eq!(width_height(&mesh, face), (1.0, 4.0));
        assert_relative_eq!(aspect_ratio(&mesh, face), 4.0);

        let wide = rect(&mut mesh, 3.0, 1.0);
        assert_relative_eq!(aspect_ratio(&mesh, wide), 3.0);
    }

    #[test]
    fn split_sides_do_not_change_the_rectangle() {
        let mut mesh = Mesh::new();
        let verts: Vec<VertexId> = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.5, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(1.0, 3.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        ]
        .into_iter()
        .map(|p| mesh.add_vertex(p))
        .collect();
        let face = mesh.add_face(verts, MaterialTag::Hull).unwrap();

        let (w, h) = width_height(&mesh, face);
        assert_relative_eq!(w, 1.0);
        assert_relative_eq!(h, 3.0);
        assert_relative_eq!(aspect_ratio(&mesh, face), 3.0);
        assert_relative_eq!(FaceFrame::new(&mesh, face).unwrap().x_axis, Vector3::x());
    }

    #[test]
    fn triangles_and_stale_faces_report_sentinels() {
        let mut mesh = Mesh::new();
        let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        let tri = mesh.add_face(vec![a, b, c], MaterialTag::Hull).unwrap();
        assert_eq!(width_height(&mesh, tri), (-1.0, -1.0));

        mesh.remove_face(tri);
        assert_relative_eq!(aspect_ratio(&mesh, tri), 1.0);
        assert!(FaceFrame::new(&mesh, tri).is_none());
        assert!(local_frame(&mesh, tri, None).is_none());
    }
}
