pub mod bounds;
pub mod polygon_2d;

pub use bounds::{Aabb, BoundingSphere};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4D vector type, used for packed vertex tangents (`w` is always zero).
pub type Vector4 = nalgebra::Vector4<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Normal of the plane every contour lives in.
pub const FORWARD: Vector3 = Vector3::new(0.0, 0.0, 1.0);
