use crate::error::{ArgumentError, RangeError, Result};
use crate::mapping::Marker;
use crate::math::Point2;

use super::{LatticeMapping, RowCol};

/// Collects markers and bins them into an `n_horizontal x n_vertical`
/// pixel grid spanning their bounding box.
///
/// Loading and binning are separate steps: [`MarkersToPixels::finish`]
/// consumes the loader, so no marker can be added after binning.
#[derive(Debug, Clone)]
pub struct MarkersToPixels<C> {
    n_horizontal: usize,
    n_vertical: usize,
    markers: Vec<Marker<C>>,
}

impl<C: PartialEq> MarkersToPixels<C> {
    /// # Errors
    ///
    /// Returns `ArgumentError::LatticeTooSmall` if either axis has fewer
    /// than two pixels.
    pub fn new(n_horizontal: usize, n_vertical: usize) -> Result<Self> {
        LatticeMapping::new(n_horizontal, n_vertical)?;
        Ok(Self {
            n_horizontal,
            n_vertical,
            markers: Vec::new(),
        })
    }

    pub fn load(&mut self, marker: Marker<C>) {
        self.markers.push(marker);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Bins every loaded marker into its nearest pixel.
    ///
    /// # Errors
    ///
    /// - `ArgumentError::NoMarkers` if nothing was loaded.
    /// - `ArgumentError::NonPositive` if the markers do not span a positive
    ///   width and height, or a coordinate is not finite.
    pub fn finish(self) -> Result<PixelBins<C>> {
        if self.markers.is_empty() {
            return Err(ArgumentError::NoMarkers.into());
        }
        let (lower, upper) = self.markers.iter().fold(
            (
                Point2::new(f64::INFINITY, f64::INFINITY),
                Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            ),
            |(lo, hi), m| {
                (
                    Point2::new(lo.x.min(m.point.x), lo.y.min(m.point.y)),
                    Point2::new(hi.x.max(m.point.x), hi.y.max(m.point.y)),
                )
            },
        );
        let lattice = LatticeMapping::new(self.n_horizontal, self.n_vertical)?
            .with_span(upper.x - lower.x, upper.y - lower.y)?
            .with_origin(lower);

        let mut bins: Vec<Vec<C>> = (0..self.n_horizontal * self.n_vertical)
            .map(|_| Vec::new())
            .collect();
        for marker in self.markers {
            let rc = lattice.coord_to_row_col(marker.point.x, marker.point.y)?;
            let bin = &mut bins[rc.row * self.n_horizontal + rc.col];
            if !bin.contains(&marker.color) {
                bin.push(marker.color);
            }
        }
        tracing::debug!(
            rows = self.n_vertical,
            cols = self.n_horizontal,
            filled = bins.iter().filter(|bin| !bin.is_empty()).count(),
            "binned markers into pixels"
        );
        Ok(PixelBins { lattice, bins })
    }
}

impl<C> Extend<Marker<C>> for MarkersToPixels<C> {
    fn extend<I: IntoIterator<Item = Marker<C>>>(&mut self, iter: I) {
        self.markers.extend(iter);
    }
}

/// Distinct marker colors that landed on each pixel.
#[derive(Debug, Clone)]
pub struct PixelBins<C> {
    lattice: LatticeMapping,
    bins: Vec<Vec<C>>,
}

impl<C> PixelBins<C> {
    /// Lattice spanning the markers' bounding box.
    #[must_use]
    pub fn lattice(&self) -> &LatticeMapping {
        &self.lattice
    }

    /// Colors of pixel `[row, col]` in loading order, without repeats.
    ///
    /// # Errors
    ///
    /// Returns `RangeError::LatticeIndex` if the pixel is outside the grid.
    pub fn colors_at(&self, row: usize, col: usize) -> Result<&[C]> {
        let (rows, cols) = (self.lattice.n_vertical(), self.lattice.n_horizontal());
        if row >= rows || col >= cols {
            return Err(RangeError::LatticeIndex {
                row,
                col,
                rows,
                cols,
            }
            .into());
        }
        Ok(&self.bins[row * cols + col])
    }

    /// Pixels no marker landed on, row-major.
    pub fn holes(&self) -> impl Iterator<Item = RowCol> + '_ {
        self.lattice
            .indices()
            .zip(&self.bins)
            .filter(|(_, bin)| bin.is_empty())
            .map(|(rc, _)| rc)
    }
}
