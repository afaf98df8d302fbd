use super::{Point2, Point3, Vector3, FORWARD, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Computes the signed area of a contour in the XY plane (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point3]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns the midpoint of two contour points, flattened onto the XY plane.
#[must_use]
pub fn midpoint(a: &Point3, b: &Point3) -> Point2 {
    Point2::new(f64::midpoint(a.x, b.x), f64::midpoint(a.y, b.y))
}

/// Computes the normalized in-plane direction from point `a` to point `b`.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if the segment has zero length.
pub fn segment_direction(a: &Point3, b: &Point3) -> Result<Vector3> {
    let d = Vector3::new(b.x - a.x, b.y - a.y, 0.0);
    d.try_normalize(TOLERANCE)
        .ok_or_else(|| GeometryError::ZeroVector.into())
}

/// Returns the extrusion tangent of the directed edge `a → b`.
///
/// The normalized edge direction is rotated by 90° in the contour plane
/// (`cross(-FORWARD, dir)`), which for a counter-clockwise triangle points
/// away from its interior. Zero-length edges yield the zero vector.
#[must_use]
pub fn edge_tangent(a: &Point3, b: &Point3) -> Vector3 {
    segment_direction(a, b).map_or_else(|_| Vector3::zeros(), |dir| (-FORWARD).cross(&dir))
}
