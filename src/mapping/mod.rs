mod checkerboard;
mod distort;
mod inverse_distort;
mod markers;
mod pullback;

pub use checkerboard::Checkerboard;
pub use distort::Distort;
pub use inverse_distort::{Fallback, InverseDistort, InverseSolution};
pub use markers::{Marker, QuadMarkers};
pub use pullback::{PullbackBuilder, PullbackCorrection};

use crate::error::{ArgumentError, Result};
use crate::math::Point2;

/// A point-to-point mapping of the Euclidean plane.
pub trait PlaneMapping {
    /// Maps `point` to its image.
    fn map(&self, point: Point2) -> Point2;
}

/// A color-valued function over (a subset of) the plane.
///
/// Any `Fn(Point2) -> C` closure is a color field. Fields that can fail
/// outside their domain use `Result<C>` as their color.
pub trait ColorField {
    type Color;

    /// Returns the color at `point`.
    fn color_at(&self, point: Point2) -> Self::Color;
}

impl<F, C> ColorField for F
where
    F: Fn(Point2) -> C,
{
    type Color = C;

    fn color_at(&self, point: Point2) -> C {
        self(point)
    }
}

/// Fails unless `value` is positive and finite.
pub(crate) fn ensure_positive(parameter: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ArgumentError::NonPositive { parameter, value }.into())
    }
}
