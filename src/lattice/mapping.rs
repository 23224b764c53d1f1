use crate::error::{ArgumentError, RangeError, Result};
use crate::mapping::ensure_positive;
use crate::math::{Point2, TOLERANCE};

/// A `[row, col]` lattice index. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowCol {
    pub row: usize,
    pub col: usize,
}

impl RowCol {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Mapping between `[row, col]` lattice indices and `(x, y)` plane
/// coordinates.
///
/// The lattice has `n_horizontal` columns and `n_vertical` rows spread
/// evenly over `x_span x y_span`, starting at `origin` (the lower-left
/// corner). Index `[0, 0]` is the upper-left lattice point, so increasing
/// the row decreases `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeMapping {
    n_horizontal: usize,
    n_vertical: usize,
    x_span: f64,
    y_span: f64,
    origin: Point2,
}

impl LatticeMapping {
    /// Creates a lattice with unit spacing and its lower-left corner at the
    /// origin.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::LatticeTooSmall` if either axis has fewer
    /// than two lattice points.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(n_horizontal: usize, n_vertical: usize) -> Result<Self> {
        if n_horizontal < 2 {
            return Err(ArgumentError::LatticeTooSmall {
                axis: "horizontal",
                count: n_horizontal,
            }
            .into());
        }
        if n_vertical < 2 {
            return Err(ArgumentError::LatticeTooSmall {
                axis: "vertical",
                count: n_vertical,
            }
            .into());
        }
        Ok(Self {
            n_horizontal,
            n_vertical,
            x_span: (n_horizontal - 1) as f64,
            y_span: (n_vertical - 1) as f64,
            origin: Point2::origin(),
        })
    }

    /// Sets the extent of the lattice in the plane.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::NonPositive` for a span that is not positive
    /// and finite.
    pub fn with_span(mut self, x_span: f64, y_span: f64) -> Result<Self> {
        ensure_positive("x_span", x_span)?;
        ensure_positive("y_span", y_span)?;
        self.x_span = x_span;
        self.y_span = y_span;
        Ok(self)
    }

    /// Sets the plane coordinate of the lower-left lattice point.
    #[must_use]
    pub fn with_origin(mut self, origin: Point2) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn n_horizontal(&self) -> usize {
        self.n_horizontal
    }

    #[must_use]
    pub fn n_vertical(&self) -> usize {
        self.n_vertical
    }

    #[must_use]
    pub fn x_span(&self) -> f64 {
        self.x_span
    }

    #[must_use]
    pub fn y_span(&self) -> f64 {
        self.y_span
    }

    #[must_use]
    pub fn origin(&self) -> Point2 {
        self.origin
    }

    /// Distance between neighbouring columns.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn spacing_x(&self) -> f64 {
        self.x_span / (self.n_horizontal - 1) as f64
    }

    /// Distance between neighbouring rows.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn spacing_y(&self) -> f64 {
        self.y_span / (self.n_vertical - 1) as f64
    }

    /// Returns the plane coordinate of a lattice point.
    ///
    /// # Errors
    ///
    /// Returns `RangeError::LatticeIndex` if the index is outside the
    /// lattice.
    pub fn row_col_to_coord(&self, row: usize, col: usize) -> Result<Point2> {
        if row >= self.n_vertical || col >= self.n_horizontal {
            return Err(RangeError::LatticeIndex {
                row,
                col,
                rows: self.n_vertical,
                cols: self.n_horizontal,
            }
            .into());
        }
        Ok(self.coord_of(RowCol { row, col }))
    }

    /// Plane coordinate of an index already known to be in the lattice.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn coord_of(&self, rc: RowCol) -> Point2 {
        let x = rc.col as f64 * self.spacing_x() + self.origin.x;
        let y = (self.n_vertical - 1 - rc.row) as f64 * self.spacing_y() + self.origin.y;
        Point2::new(x, y)
    }

    /// Returns the lattice point nearest to `(x, y)`.
    ///
    /// A coordinate exactly halfway between two lattice lines goes to the
    /// even index.
    ///
    /// # Errors
    ///
    /// Returns `RangeError::Coordinate` if the coordinate lies outside the
    /// lattice span.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn coord_to_row_col(&self, x: f64, y: f64) -> Result<RowCol> {
        if !(within_span(x, self.origin.x, self.x_span) && within_span(y, self.origin.y, self.y_span))
        {
            return Err(RangeError::Coordinate { x, y }.into());
        }
        let max_col = (self.n_horizontal - 1) as f64;
        let max_row = (self.n_vertical - 1) as f64;
        let col = ((x - self.origin.x) / self.spacing_x())
            .round_ties_even()
            .clamp(0.0, max_col);
        let rows_up = ((y - self.origin.y) / self.spacing_y())
            .round_ties_even()
            .clamp(0.0, max_row);
        Ok(RowCol {
            row: self.n_vertical - 1 - rows_up as usize,
            col: col as usize,
        })
    }

    /// Iterates over every lattice index in row-major order.
    pub fn indices(&self) -> impl Iterator<Item = RowCol> + '_ {
        (0..self.n_vertical)
            .flat_map(move |row| (0..self.n_horizontal).map(move |col| RowCol { row, col }))
    }
}

/// `value` lies in `[start, start + span]` up to rounding.
fn within_span(value: f64, start: f64, span: f64) -> bool {
    let slack = TOLERANCE * span.max(1.0);
    value >= start - slack && value <= start + span + slack
}
