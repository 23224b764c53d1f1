pub mod vector_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 2x2 matrix type.
pub type Matrix2 = nalgebra::Matrix2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Default tolerance for bisection termination, alignment tests and
/// hull-vertex identity.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Largest tolerance accepted by the inverse distortion search.
pub const MAX_TOLERANCE: f64 = 0.01;
