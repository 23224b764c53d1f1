use crate::error::Result;
use crate::mapping::{ColorField, PullbackCorrection};

use super::LatticeMapping;

/// Pixel view of a [`PullbackCorrection`].
///
/// Each `[row, col]` of the corrected image is placed in the plane by the
/// lattice and colored by the pullback.
#[derive(Clone)]
pub struct PixelPullback<F> {
    lattice: LatticeMapping,
    pullback: PullbackCorrection<F>,
}

impl<F> PixelPullback<F> {
    #[must_use]
    pub fn new(lattice: LatticeMapping, pullback: PullbackCorrection<F>) -> Self {
        Self { lattice, pullback }
    }

    /// Creates an `n_horizontal x n_vertical` pixel grid spanning the
    /// pullback's corrected domain.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::LatticeTooSmall` if either axis has fewer
    /// than two pixels.
    pub fn over_domain(
        n_horizontal: usize,
        n_vertical: usize,
        pullback: PullbackCorrection<F>,
    ) -> Result<Self> {
        let domain = pullback.corrected_domain();
        let lattice = LatticeMapping::new(n_horizontal, n_vertical)?
            .with_span(domain.x_span(), domain.y_span())?
            .with_origin(domain.ll());
        Ok(Self::new(lattice, pullback))
    }

    #[must_use]
    pub fn lattice(&self) -> &LatticeMapping {
        &self.lattice
    }

    #[must_use]
    pub fn pullback(&self) -> &PullbackCorrection<F> {
        &self.pullback
    }
}

impl<F> std::fmt::Debug for PixelPullback<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelPullback")
            .field("lattice", &self.lattice)
            .field("pullback", &self.pullback)
            .finish()
    }
}

impl<F: ColorField> PixelPullback<F> {
    /// Returns the color of pixel `[row, col]` of the corrected image.
    ///
    /// # Errors
    ///
    /// Returns `RangeError::LatticeIndex` if the pixel is outside the grid.
    pub fn color_at(&self, row: usize, col: usize) -> Result<F::Color> {
        let coord = self.lattice.row_col_to_coord(row, col)?;
        Ok(self.pullback.corrected_visualization(coord))
    }

    /// Renders the whole corrected image in row-major order.
    ///
    /// # Errors
    ///
    /// Propagates any error of [`PixelPullback::color_at`].
    pub fn render(&self) -> Result<Vec<F::Color>> {
        let pixels = self
            .lattice
            .indices()
            .map(|rc| self.color_at(rc.row, rc.col))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(
            rows = self.lattice.n_vertical(),
            cols = self.lattice.n_horizontal(),
            "rendered corrected image"
        );
        Ok(pixels)
    }
}
