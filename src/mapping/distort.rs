use crate::error::Result;
use crate::geometry::ConvexPolygon;
use crate::math::vector_2d::bilinear;
use crate::math::Point2;

use super::{ensure_positive, PlaneMapping};

/// Forward distortion from a `height x width` rectangle onto a convex
/// quadrilateral `A, B, C, D`.
///
/// The first coordinate of a domain point runs along the height axis
/// (`A -> B`), the second along the width axis (`A -> D`):
///
/// ```text
/// s = p[0] / height,  t = p[1] / width
/// M = (1 - s) A + s B,  N = (1 - s) D + s C
/// map(p) = (1 - t) M + t N
/// ```
#[derive(Debug, Clone)]
pub struct Distort {
    width: f64,
    height: f64,
    quad: [Point2; 4],
}

impl Distort {
    /// Creates the mapping onto `quadrilateral`, whose vertices are taken
    /// in traversal order as `A, B, C, D`.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::VertexCount` if the polygon does not have
    /// four sides, or `ArgumentError::NonPositive` for a width or height
    /// that is not positive and finite.
    pub fn new(width: f64, height: f64, quadrilateral: &ConvexPolygon) -> Result<Self> {
        let quad = quadrilateral.quad_vertices()?;
        ensure_positive("width", width)?;
        ensure_positive("height", height)?;
        tracing::debug!(width, height, ?quad, "built forward distortion");
        Ok(Self {
            width,
            height,
            quad,
        })
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the quadrilateral vertices `A, B, C, D`.
    #[must_use]
    pub fn vertices(&self) -> &[Point2; 4] {
        &self.quad
    }

    /// Maps a domain point into the quadrilateral.
    ///
    /// Points outside the domain are not rejected: the bilinear form
    /// extrapolates continuously.
    #[must_use]
    pub fn map(&self, point: Point2) -> Point2 {
        let s = point.x / self.height;
        let t = point.y / self.width;
        bilinear(&self.quad, s, t)
    }
}

impl PlaneMapping for Distort {
    fn map(&self, point: Point2) -> Point2 {
        Distort::map(self, point)
    }
}
