use serde::{Deserialize, Serialize};

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// A world coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Index of this axis into a point or vector.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Transforms a point by a 4x4 matrix (homogeneous coordinates).
#[must_use]
pub fn transform_point(matrix: &Matrix4, point: &Point3) -> Point3 {
    let v = matrix * nalgebra::Vector4::new(point.x, point.y, point.z, 1.0);
    Point3::new(v.x, v.y, v.z)
}

/// Rotation about a world axis by `degrees`, as a 4x4 matrix.
#[must_use]
pub fn rotation(axis: Axis, degrees: f64) -> Matrix4 {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };
    Matrix4::from_axis_angle(&axis, degrees.to_radians())
}

/// Pure translation matrix.
#[must_use]
pub fn translation(x: f64, y: f64, z: f64) -> Matrix4 {
    Matrix4::new_translation(&Vector3::new(x, y, z))
}

/// Newell normal of a polygon, unnormalized. Its length is twice the
/// polygon's area, so it degrades gracefully on slightly non-planar loops.
#[must_use]
pub fn newell(points: &[Point3]) -> Vector3 {
    let n = points.len();
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let curr = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }
    normal
}

/// Unit normal of a polygon, or `None` when it has no area.
#[must_use]
pub fn polygon_normal(points: &[Point3]) -> Option<Vector3> {
    if points.len() < 3 {
        return None;
    }
    let normal = newell(points);
    let len = normal.norm();
    (len > TOLERANCE).then(|| normal / len)
}

/// Sine of the turn angle below which a polygon vertex lies on a straight
/// side instead of at a corner.
pub const STRAIGHT_SINE: f64 = 1e-6;

/// Indices of a polygon's geometric corners, in loop order.
///
/// Vertices sitting on a straight run between their neighbours (split
/// points spliced in from a neighbouring face) are skipped, and so is a
/// vertex that repeats the position of the one before it.
#[must_use]
pub fn corner_indices(points: &[Point3]) -> Vec<usize> {
    let n = points.len();
    let distinct = |i: usize, step: usize| {
        (1..n)
            .map(|k| points[(i + k * step) % n])
            .find(|q| (*q - points[i]).norm() > TOLERANCE)
    };
    (0..n)
        .filter(|&i| {
            if n < 3 || (points[i] - points[(i + n - 1) % n]).norm() <= TOLERANCE {
                return false;
            }
            let (Some(prev), Some(next)) = (distinct(i, n - 1), distinct(i, 1)) else {
                return false;
            };
            let incoming = points[i] - prev;
            let outgoing = next - points[i];
            let turn = incoming.cross(&outgoing).norm();
            turn > STRAIGHT_SINE * incoming.norm() * outgoing.norm() || incoming.dot(&outgoing) < 0.0
        })
        .collect()
}

/// Center of the axis-aligned bounds of a point set.
#[must_use]
pub fn bounds_center(points: &[Point3]) -> Point3 {
    let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
    let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min = min.inf(p);
        max = max.sup(p);
    }
    nalgebra::center(&min, &max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn newell_of_ccw_square_points_up() {
        let square = [p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(2.0, 2.0, 0.0), p(0.0, 2.0, 0.0)];
        let n = newell(&square);
        assert_relative_eq!(n, Vector3::new(0.0, 0.0, 8.0), epsilon = 1e-12);
        assert_relative_eq!(polygon_normal(&square).unwrap_or_default(), Vector3::z());
    }

    #[test]
    fn collinear_polygon_has_no_normal() {
        let line = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)];
        assert!(polygon_normal(&line).is_none());
        assert!(polygon_normal(&line[..2]).is_none());
    }

    #[test]
    fn rotation_about_y_moves_x_toward_minus_z() {
        let m = rotation(Axis::Y, 90.0);
        let q = transform_point(&m, &p(1.0, 0.0, 0.0));
        assert_relative_eq!(q, p(0.0, 0.0, -1.0), epsilon = 1e-12);
        let t = transform_point(&translation(5.0, 5.0, 5.0), &q);
        assert_relative_eq!(t, p(5.0, 5.0, 4.0), epsilon = 1e-12);
    }

    #[test]
    fn corners_skip_straight_run_vertices() {
        let split = [
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(3.0, 0.0, 0.0),
            p(3.0, 2.0, 0.0),
            p(3.0, 2.0, 0.0),
            p(1.5, 2.0, 0.0),
            p(0.0, 2.0, 0.0),
            p(0.0, 1.0, 0.0),
        ];
        assert_eq!(corner_indices(&split), vec![0, 2, 3, 6]);

        let square = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)];
        assert_eq!(corner_indices(&square), vec![0, 1, 2, 3]);
        assert!(corner_indices(&square[..2]).is_empty());
    }

    #[test]
    fn bounds_center_ignores_point_density() {
        let pts = [p(0.0, 0.0, 0.0), p(0.1, 0.0, 0.0), p(0.2, 0.0, 0.0), p(4.0, 2.0, 0.0)];
        assert_relative_eq!(bounds_center(&pts), p(2.0, 1.0, 0.0));
    }
}
