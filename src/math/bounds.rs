use super::{Point3, Vector3};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self {
            min: Point3::origin(),
            max: Point3::origin(),
        }
    }
}

impl Aabb {
    /// Creates a box from explicit corners.
    #[must_use]
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Computes the bounds of a point set in a single pass.
    ///
    /// An empty set yields the zero box (`min = max = origin`) rather than
    /// the inverted infinite box.
    #[must_use]
    pub fn from_points(points: &[Point3]) -> Self {
        if points.is_empty() {
            return Self::default();
        }
        let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min = min.inf(p);
            max = max.sup(p);
        }
        Self { min, max }
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Full size along each axis.
    #[must_use]
    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    /// Half the size along each axis.
    #[must_use]
    pub fn extents(&self) -> Vector3 {
        self.size() * 0.5
    }

    /// Returns `true` if `p` lies inside or on the boundary of the box.
    #[must_use]
    pub fn contains(&self, p: &Point3) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }

    /// Smallest box enclosing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Returns the box moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: &Vector3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// A bounding sphere derived from an [`Aabb`], used for light culling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Center of the sphere.
    pub center: Point3,
    /// Radius; zero for a single point.
    pub radius: f64,
}

impl BoundingSphere {
    /// Creates a sphere from a center and radius.
    #[must_use]
    pub fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Sphere centred on the box with the half diagonal as radius.
    #[must_use]
    pub fn from_aabb(aabb: &Aabb) -> Self {
        Self {
            center: aabb.center(),
            radius: aabb.extents().norm(),
        }
    }

    /// Returns `true` if the two spheres touch or overlap.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let radii = self.radius + other.radius;
        (self.center - other.center).norm_squared() <= radii * radii
    }
}
