use crate::error::{ArgumentError, RangeError, Result};
use crate::geometry::ConvexPolygon;
use crate::mapping::Marker;

use super::{LatticeMapping, RowCol};

/// Pixels of an image that fall inside a convex region.
///
/// The region is given by pixel indices of its vertices. The image is
/// cropped to the bounding box of those vertices, and the cropped pixels
/// are laid on a unit lattice whose lower-left pixel sits at the origin.
/// Each pixel inside the region becomes a [`Marker`] carrying the color of
/// the original image.
#[derive(Clone)]
pub struct MarkersInRegion<F> {
    pixel_color: F,
    offset: RowCol,
    lattice: LatticeMapping,
    region: ConvexPolygon,
}

impl<F> MarkersInRegion<F> {
    /// Selects the region with `vertices` in an `n_horizontal x n_vertical`
    /// image whose pixels are colored by `pixel_color(row, col)`.
    ///
    /// # Errors
    ///
    /// - `ArgumentError::EmptyPolygon` if no vertices are given.
    /// - `RangeError::LatticeIndex` if a vertex lies outside the image.
    /// - `ArgumentError::LatticeTooSmall` if the vertices span a single
    ///   row or column.
    /// - `GeometryError::NotConvex` if the vertices are not in convex order.
    pub fn new(
        pixel_color: F,
        n_horizontal: usize,
        n_vertical: usize,
        vertices: &[RowCol],
    ) -> Result<Self> {
        if let Some(rc) = vertices
            .iter()
            .find(|rc| rc.row >= n_vertical || rc.col >= n_horizontal)
        {
            return Err(RangeError::LatticeIndex {
                row: rc.row,
                col: rc.col,
                rows: n_vertical,
                cols: n_horizontal,
            }
            .into());
        }
        let (Some(row_min), Some(row_max), Some(col_min), Some(col_max)) = (
            vertices.iter().map(|rc| rc.row).min(),
            vertices.iter().map(|rc| rc.row).max(),
            vertices.iter().map(|rc| rc.col).min(),
            vertices.iter().map(|rc| rc.col).max(),
        ) else {
            return Err(ArgumentError::EmptyPolygon.into());
        };

        let lattice = LatticeMapping::new(col_max - col_min + 1, row_max - row_min + 1)?;
        let corners = vertices
            .iter()
            .map(|rc| lattice.coord_of(RowCol::new(rc.row - row_min, rc.col - col_min)))
            .collect();
        let region = ConvexPolygon::new(corners)?;
        tracing::debug!(
            rows = lattice.n_vertical(),
            cols = lattice.n_horizontal(),
            row_min,
            col_min,
            "cropped image to region"
        );
        Ok(Self {
            pixel_color,
            offset: RowCol::new(row_min, col_min),
            lattice,
            region,
        })
    }

    /// Upper-left pixel of the crop in the original image.
    #[must_use]
    pub fn offset(&self) -> RowCol {
        self.offset
    }

    /// Lattice over the cropped image.
    #[must_use]
    pub fn lattice(&self) -> &LatticeMapping {
        &self.lattice
    }

    /// The selected region in cropped lattice coordinates.
    #[must_use]
    pub fn region(&self) -> &ConvexPolygon {
        &self.region
    }

    /// Iterates row-major over the pixels inside the region.
    pub fn iter<C>(&self) -> impl Iterator<Item = Marker<C>> + '_
    where
        F: Fn(usize, usize) -> C,
    {
        self.lattice.indices().filter_map(move |rc| {
            let point = self.lattice.coord_of(rc);
            self.region.contains_point(&point).inside.then(|| Marker {
                point,
                color: (self.pixel_color)(rc.row + self.offset.row, rc.col + self.offset.col),
            })
        })
    }
}

impl<F> std::fmt::Debug for MarkersInRegion<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkersInRegion")
            .field("offset", &self.offset)
            .field("lattice", &self.lattice)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}
