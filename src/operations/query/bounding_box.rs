use crate::math::{Axis, Point3, Vector3};
use crate::topology::Mesh;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Bounds of a point set, `None` when the set is empty.
    pub fn from_points(points: impl IntoIterator<Item = Point3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.inf(&p), max.sup(&p)));
        Some(Self { min, max })
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Edge lengths along each axis.
    #[must_use]
    pub fn extent(&self) -> Vector3 {
        self.max - self.min
    }

    /// Returns `true` if the box is mirror-symmetric about the plane
    /// through the origin perpendicular to `axis`.
    #[must_use]
    pub fn is_symmetric_about(&self, axis: Axis, tolerance: f64) -> bool {
        let i = axis.index();
        (self.min[i] + self.max[i]).abs() <= tolerance
    }
}

/// Computes the axis-aligned bounding box of every vertex in a mesh.
#[derive(Debug, Default)]
pub struct BoundingBox;

impl BoundingBox {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the query. Returns `None` for a mesh with no vertices.
    #[must_use]
    pub fn execute(&self, mesh: &Mesh) -> Option<Aabb> {
        Aabb::from_points(mesh.vertices().map(|(_, v)| v.point))
    }
}
