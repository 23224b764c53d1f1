use crate::error::{ArgumentError, Result};
use crate::math::Point2;

use super::{Containment, ConvexPolygon};

/// An axis-aligned rectangle.
///
/// Stored as a [`ConvexPolygon`] with vertices lower-left, lower-right,
/// upper-right, upper-left (counter-clockwise). Extents are computed from
/// those vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct RectPolygon {
    polygon: ConvexPolygon,
}

impl RectPolygon {
    /// Creates a rectangle from its lower-left and upper-right corners.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::CornerOrder` unless
    /// `lower_left.x <= upper_right.x` and `lower_left.y <= upper_right.y`.
    pub fn new(lower_left: Point2, upper_right: Point2) -> Result<Self> {
        if !(lower_left.x <= upper_right.x && lower_left.y <= upper_right.y) {
            return Err(ArgumentError::CornerOrder {
                lower_left: (lower_left.x, lower_left.y),
                upper_right: (upper_right.x, upper_right.y),
            }
            .into());
        }
        Ok(Self::from_ordered_corners(lower_left, upper_right))
    }

    /// Builds the rectangle from corners already known to be ordered.
    pub(crate) fn from_ordered_corners(lower_left: Point2, upper_right: Point2) -> Self {
        let (x_min, y_min) = (lower_left.x, lower_left.y);
        let (x_max, y_max) = (upper_right.x, upper_right.y);
        let polygon = ConvexPolygon::from_convex_unchecked(vec![
            Point2::new(x_min, y_min),
            Point2::new(x_max, y_min),
            Point2::new(x_max, y_max),
            Point2::new(x_min, y_max),
        ]);
        Self { polygon }
    }

    #[must_use]
    pub fn x_min(&self) -> f64 {
        self.polygon.vertices()[0].x
    }

    #[must_use]
    pub fn x_max(&self) -> f64 {
        self.polygon.vertices()[2].x
    }

    #[must_use]
    pub fn y_min(&self) -> f64 {
        self.polygon.vertices()[0].y
    }

    #[must_use]
    pub fn y_max(&self) -> f64 {
        self.polygon.vertices()[2].y
    }

    /// Width of the rectangle.
    #[must_use]
    pub fn x_span(&self) -> f64 {
        self.x_max() - self.x_min()
    }

    /// Height of the rectangle.
    #[must_use]
    pub fn y_span(&self) -> f64 {
        self.y_max() - self.y_min()
    }

    /// Lower-left corner.
    #[must_use]
    pub fn ll(&self) -> Point2 {
        self.polygon.vertices()[0]
    }

    /// Lower-right corner.
    #[must_use]
    pub fn lr(&self) -> Point2 {
        self.polygon.vertices()[1]
    }

    /// Upper-right corner.
    #[must_use]
    pub fn ur(&self) -> Point2 {
        self.polygon.vertices()[2]
    }

    /// Upper-left corner.
    #[must_use]
    pub fn ul(&self) -> Point2 {
        self.polygon.vertices()[3]
    }

    /// See [`ConvexPolygon::contains_point`].
    #[must_use]
    pub fn contains_point(&self, point: &Point2) -> Containment {
        self.polygon.contains_point(point)
    }

    /// Returns the rectangle as a general convex polygon.
    #[must_use]
    pub fn as_polygon(&self) -> &ConvexPolygon {
        &self.polygon
    }

    #[must_use]
    pub fn into_polygon(self) -> ConvexPolygon {
        self.polygon
    }
}
