use crate::error::Result;
use crate::geometry::ConvexPolygon;
use crate::math::{Point2, TOLERANCE};

use super::{ensure_positive, Checkerboard};

/// A colored sample at a plane point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker<C> {
    pub point: Point2,
    pub color: C,
}

impl<C> Marker<C> {
    #[must_use]
    pub fn new(point: Point2, color: C) -> Self {
        Self { point, color }
    }
}

/// Checkerboard samples on a regular grid, kept where they fall inside a
/// convex quadrilateral.
///
/// The grid starts at the lower-left corner of the board's frame and steps
/// by `spacing_x` and `spacing_y` up to the frame's far edges; the last
/// grid line is clamped onto the frame. Markers are produced row by row
/// from the bottom, left to right.
#[derive(Debug, Clone)]
pub struct QuadMarkers<'a, C> {
    board: &'a Checkerboard<C>,
    quadrilateral: &'a ConvexPolygon,
    spacing_x: f64,
    spacing_y: f64,
}

impl<'a, C: Copy> QuadMarkers<'a, C> {
    /// # Errors
    ///
    /// Returns `ArgumentError::NonPositive` if a spacing is not positive
    /// and finite.
    pub fn new(
        board: &'a Checkerboard<C>,
        quadrilateral: &'a ConvexPolygon,
        spacing_x: f64,
        spacing_y: f64,
    ) -> Result<Self> {
        ensure_positive("spacing_x", spacing_x)?;
        ensure_positive("spacing_y", spacing_y)?;
        Ok(Self {
            board,
            quadrilateral,
            spacing_x,
            spacing_y,
        })
    }

    #[must_use]
    pub fn quadrilateral(&self) -> &ConvexPolygon {
        self.quadrilateral
    }

    /// Number of grid columns and rows laid over the frame.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn grid_size(&self) -> (usize, usize) {
        let frame = self.board.frame();
        let cols = (frame.x_span() / self.spacing_x + TOLERANCE).floor() as usize + 1;
        let rows = (frame.y_span() / self.spacing_y + TOLERANCE).floor() as usize + 1;
        (cols, rows)
    }

    /// Iterates over the markers inside the quadrilateral.
    ///
    /// Parts of the quadrilateral outside the board's frame get no markers.
    #[allow(clippy::cast_precision_loss)]
    pub fn iter(&self) -> impl Iterator<Item = Marker<C>> + 'a {
        let (cols, rows) = self.grid_size();
        let board = self.board;
        let quadrilateral = self.quadrilateral;
        let (origin, far) = (board.frame().ll(), board.frame().ur());
        let (spacing_x, spacing_y) = (self.spacing_x, self.spacing_y);
        (0..rows)
            .flat_map(move |j| (0..cols).map(move |i| (i, j)))
            .map(move |(i, j)| {
                Point2::new(
                    (origin.x + i as f64 * spacing_x).min(far.x),
                    (origin.y + j as f64 * spacing_y).min(far.y),
                )
            })
            .filter(move |point| quadrilateral.contains_point(point).inside)
            .map(move |point| Marker {
                point,
                color: board.color_in_frame(point),
            })
    }
}
