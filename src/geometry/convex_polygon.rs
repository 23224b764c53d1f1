use crate::error::{ArgumentError, GeometryError, Result};
use crate::math::vector_2d::{cross_2d, points_from_coords};
use crate::math::Point2;

use super::RectPolygon;

/// Outcome of a point-in-polygon query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Containment {
    /// The point lies inside the polygon or on its boundary.
    pub inside: bool,
    /// The point lies exactly on the boundary.
    pub on_boundary: bool,
}

impl Containment {
    pub const OUTSIDE: Self = Self {
        inside: false,
        on_boundary: false,
    };
    pub const INTERIOR: Self = Self {
        inside: true,
        on_boundary: false,
    };
    pub const BOUNDARY: Self = Self {
        inside: true,
        on_boundary: true,
    };
}

/// A convex polygon given by its ordered vertices.
///
/// The traversal order defines the boundary orientation; either clockwise
/// or counter-clockwise is accepted. A single vertex is a degenerate
/// "point" polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolygon {
    vertices: Vec<Point2>,
}

impl ConvexPolygon {
    /// Creates a polygon from ordered vertices.
    ///
    /// Polygons with more than three vertices must turn in one rotational
    /// sense all the way around. Zero turns (repeated or collinear
    /// vertices) do not count as a change of direction.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::EmptyPolygon` for an empty vertex list and
    /// `GeometryError::NotConvex` if the turning direction changes.
    pub fn new(vertices: Vec<Point2>) -> Result<Self> {
        if vertices.is_empty() {
            return Err(ArgumentError::EmptyPolygon.into());
        }
        check_convexity(&vertices)?;
        Ok(Self { vertices })
    }

    /// Creates a polygon from untyped coordinate rows such as `[[0.0, 0.0], ...]`.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::Dimension` if a row is not 2-dimensional, or
    /// any error of [`ConvexPolygon::new`].
    pub fn from_coords<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        Self::new(points_from_coords(rows)?)
    }

    /// Wraps vertices already known to be convex, e.g. a half of a convex
    /// quadrilateral cut by a segment between two of its edges.
    pub(crate) fn from_convex_unchecked(vertices: Vec<Point2>) -> Self {
        debug_assert!(!vertices.is_empty());
        Self { vertices }
    }

    /// Returns the ordered vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Returns the number of sides (equal to the number of vertices).
    #[must_use]
    pub fn n_sides(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn x_min(&self) -> f64 {
        self.vertices.iter().map(|v| v.x).fold(f64::INFINITY, f64::min)
    }

    #[must_use]
    pub fn x_max(&self) -> f64 {
        self.vertices.iter().map(|v| v.x).fold(f64::NEG_INFINITY, f64::max)
    }

    #[must_use]
    pub fn y_min(&self) -> f64 {
        self.vertices.iter().map(|v| v.y).fold(f64::INFINITY, f64::min)
    }

    #[must_use]
    pub fn y_max(&self) -> f64 {
        self.vertices.iter().map(|v| v.y).fold(f64::NEG_INFINITY, f64::max)
    }

    /// Diameter of the polygon along the x-axis.
    #[must_use]
    pub fn max_x_dist(&self) -> f64 {
        self.x_max() - self.x_min()
    }

    /// Diameter of the polygon along the y-axis.
    #[must_use]
    pub fn max_y_dist(&self) -> f64 {
        self.y_max() - self.y_min()
    }

    /// Returns the axis-aligned rectangle bounding this polygon.
    #[must_use]
    pub fn bounding_rect(&self) -> RectPolygon {
        RectPolygon::from_ordered_corners(
            Point2::new(self.x_min(), self.y_min()),
            Point2::new(self.x_max(), self.y_max()),
        )
    }

    /// Returns the four vertices of a quadrilateral.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::VertexCount` unless the polygon has exactly
    /// four sides.
    pub fn quad_vertices(&self) -> Result<[Point2; 4]> {
        match self.vertices.as_slice() {
            &[a, b, c, d] => Ok([a, b, c, d]),
            other => Err(ArgumentError::VertexCount {
                expected: 4,
                found: other.len(),
            }
            .into()),
        }
    }

    /// Tests whether `point` lies in the polygon and whether it lies on
    /// the boundary.
    ///
    /// Every edge must see the point on the same side. A point exactly on
    /// an edge is reported as a boundary point as soon as that edge is
    /// reached. Non-finite points are outside. Results near vertices are
    /// subject to floating-point rounding.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn contains_point(&self, point: &Point2) -> Containment {
        let n = self.vertices.len();
        let mut side: i8 = 0;
        for i in 0..n {
            let start = &self.vertices[i];
            let end = &self.vertices[(i + 1) % n];
            let edge = end - start;
            if edge.x == 0.0 && edge.y == 0.0 {
                continue;
            }
            let pivot = point - start;
            let cross = cross_2d(&edge, &pivot);
            if !cross.is_finite() {
                return Containment::OUTSIDE;
            }
            if cross == 0.0 {
                // On the supporting line beyond the segment, the neighbouring
                // edges decide: a collinear one reports the boundary, a
                // turning one sees the point outside.
                let along = edge.dot(&pivot);
                if (0.0..=edge.norm_squared()).contains(&along) {
                    return Containment::BOUNDARY;
                }
                continue;
            }
            let status = if cross > 0.0 { 1 } else { -1 };
            if side == 0 {
                side = status;
            } else if side != status {
                return Containment::OUTSIDE;
            }
        }

        if side == 0 {
            // Point polygon, or every vertex coincides.
            let v = &self.vertices[0];
            return if v.x == point.x && v.y == point.y {
                Containment::BOUNDARY
            } else {
                Containment::OUTSIDE
            };
        }
        Containment::INTERIOR
    }
}

impl From<RectPolygon> for ConvexPolygon {
    fn from(rect: RectPolygon) -> Self {
        rect.into_polygon()
    }
}

/// Checks that consecutive edges keep turning in one direction.
#[allow(clippy::float_cmp)]
fn check_convexity(vertices: &[Point2]) -> Result<()> {
    let n = vertices.len();
    if n <= 3 {
        return Ok(());
    }

    let mut turning: i8 = 0;
    let mut prev = vertices[0] - vertices[n - 1];
    for i in 0..n {
        let curr = vertices[(i + 1) % n] - vertices[i];
        let cross = cross_2d(&prev, &curr);
        prev = curr;
        if cross == 0.0 {
            continue;
        }
        let status = if cross > 0.0 { 1 } else { -1 };
        if turning == 0 {
            turning = status;
        } else if turning != status {
            return Err(GeometryError::NotConvex { index: i }.into());
        }
    }
    Ok(())
}
