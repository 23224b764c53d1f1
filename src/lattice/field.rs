use crate::error::Result;
use crate::math::Point2;

use super::LatticeMapping;

/// A color function on lattice points, pulled back to the plane.
///
/// A plane point takes the color of its nearest lattice point, so the
/// result is piecewise constant over the lattice span.
#[derive(Clone)]
pub struct LatticeColorField<F> {
    row_col_color: F,
    lattice: LatticeMapping,
}

impl<F> LatticeColorField<F> {
    #[must_use]
    pub fn new(row_col_color: F, lattice: LatticeMapping) -> Self {
        Self {
            row_col_color,
            lattice,
        }
    }

    #[must_use]
    pub fn lattice(&self) -> &LatticeMapping {
        &self.lattice
    }

    /// Returns the color of the lattice point nearest to `point`.
    ///
    /// # Errors
    ///
    /// Returns `RangeError::Coordinate` if `point` lies outside the lattice
    /// span.
    pub fn color_at<C>(&self, point: Point2) -> Result<C>
    where
        F: Fn(usize, usize) -> C,
    {
        let rc = self.lattice.coord_to_row_col(point.x, point.y)?;
        Ok((self.row_col_color)(rc.row, rc.col))
    }

    /// Borrows this field as a plane color field closure.
    #[must_use]
    pub fn as_color_field<C>(&self) -> impl Fn(Point2) -> Result<C> + '_
    where
        F: Fn(usize, usize) -> C,
    {
        move |point| self.color_at(point)
    }
}

impl<F> std::fmt::Debug for LatticeColorField<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LatticeColorField")
            .field("lattice", &self.lattice)
            .finish_non_exhaustive()
    }
}
