use crate::error::{RangeError, Result};
use crate::geometry::{ConvexPolygon, RectPolygon};
use crate::math::Point2;

use super::ensure_positive;

/// A two-color checkerboard laid over a rectangular frame.
///
/// Squares are `square_x` wide and `square_y` tall, counted from the
/// frame's lower-left corner. The square touching that corner is `dark`.
#[derive(Debug, Clone)]
pub struct Checkerboard<C> {
    frame: RectPolygon,
    square_x: f64,
    square_y: f64,
    light: C,
    dark: C,
}

impl<C: Copy> Checkerboard<C> {
    /// Creates a checkerboard over `frame`.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::NonPositive` if a square span is not
    /// positive and finite.
    pub fn new(frame: RectPolygon, square_x: f64, square_y: f64, light: C, dark: C) -> Result<Self> {
        ensure_positive("square_x", square_x)?;
        ensure_positive("square_y", square_y)?;
        Ok(Self {
            frame,
            square_x,
            square_y,
            light,
            dark,
        })
    }

    /// Creates a checkerboard over the bounding rectangle of `polygon`.
    ///
    /// # Errors
    ///
    /// See [`Checkerboard::new`].
    pub fn around(
        polygon: &ConvexPolygon,
        square_x: f64,
        square_y: f64,
        light: C,
        dark: C,
    ) -> Result<Self> {
        Self::new(polygon.bounding_rect(), square_x, square_y, light, dark)
    }

    #[must_use]
    pub fn frame(&self) -> &RectPolygon {
        &self.frame
    }

    /// Returns the color of the square containing `point`.
    ///
    /// # Errors
    ///
    /// Returns `RangeError::OutsideFrame` if `point` is outside the frame.
    pub fn color_at(&self, point: Point2) -> Result<C> {
        if !self.frame.contains_point(&point).inside {
            return Err(RangeError::OutsideFrame {
                x: point.x,
                y: point.y,
            }
            .into());
        }
        Ok(self.color_in_frame(point))
    }

    /// Color of a point already known to lie in the frame.
    pub(crate) fn color_in_frame(&self, point: Point2) -> C {
        let dx = point.x - self.frame.x_min();
        let dy = point.y - self.frame.y_min();
        let first_column = dx % (2.0 * self.square_x) < self.square_x;
        let first_row = dy % (2.0 * self.square_y) < self.square_y;
        if first_column ^ first_row {
            self.light
        } else {
            self.dark
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn board() -> Checkerboard<char> {
        let frame = RectPolygon::new(p(0.0, 0.0), p(30.0, 30.0)).unwrap();
        Checkerboard::new(frame, 3.0, 3.0, 'w', 'b').unwrap()
    }

    #[test]
    fn alternates_between_squares() {
        let b = board();
        assert_eq!(b.color_at(p(1.0, 1.0)).unwrap(), 'b');
        assert_eq!(b.color_at(p(4.0, 1.0)).unwrap(), 'w');
        assert_eq!(b.color_at(p(1.0, 4.0)).unwrap(), 'w');
        assert_eq!(b.color_at(p(4.0, 4.0)).unwrap(), 'b');
        assert_eq!(b.color_at(p(29.5, 29.5)).unwrap(), 'b');
    }

    #[test]
    fn outside_frame_is_out_of_range() {
        let err = board().color_at(p(31.0, 1.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn frame_follows_polygon_bounds() {
        let quad =
            ConvexPolygon::new(vec![p(0.0, 5.0), p(5.0, 0.0), p(20.0, 5.0), p(5.0, 10.0)]).unwrap();
        let b = Checkerboard::around(&quad, 1.0, 1.0, 1_u8, 0_u8).unwrap();
        assert_eq!(b.frame().ll(), p(0.0, 0.0));
        assert_eq!(b.frame().ur(), p(20.0, 10.0));
        // Frame corners lie outside the quadrilateral but inside the board.
        assert_eq!(b.color_at(p(0.5, 0.5)).unwrap(), 0);
        assert_eq!(b.color_at(p(19.5, 0.5)).unwrap(), 1);
    }

    #[test]
    fn rejects_degenerate_squares() {
        let frame = RectPolygon::new(p(0.0, 0.0), p(1.0, 1.0)).unwrap();
        let err = Checkerboard::new(frame, 0.0, 1.0, 'w', 'b').unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
