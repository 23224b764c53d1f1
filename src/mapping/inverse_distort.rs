use crate::error::{ArgumentError, Result};
use crate::geometry::ConvexPolygon;
use crate::math::vector_2d::{is_aligned, lerp};
use crate::math::{Point2, DEFAULT_TOLERANCE, MAX_TOLERANCE};

use super::PlaneMapping;

/// Parameter reported when a bisection ends without an aligned hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fallback {
    /// Midpoint of the final bracket, within the tolerance of the root.
    #[default]
    Midpoint,
    /// Zero, regardless of the bracket. Matches older callers that treat
    /// `0` as "not found".
    Zero,
}

/// Result of an inverse mapping with its convergence status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseSolution {
    /// Recovered parameters in `[0, 1]²`.
    pub point: Point2,
    /// Both searches stopped on a splitting segment through the point.
    /// When `false`, at least one coordinate comes from the [`Fallback`].
    pub converged: bool,
}

/// Outcome of one bisection.
#[derive(Debug, Clone, Copy)]
enum Search {
    Hit(f64),
    Exhausted { lower: f64, upper: f64 },
}

/// Numerical inverse of the bilinear distortion onto a convex
/// quadrilateral `A, B, C, D`.
///
/// Each parameter is found by bisecting on the containment of the point
/// in one half of the quadrilateral. For the first parameter the half is
/// `[A, M(s), N(s), D]` with `M(s)` on `A -> B` and `N(s)` on `D -> C`;
/// for the second it is `[A, B, W(t), V(t)]` with `V(t)` on `A -> D` and
/// `W(t)` on `B -> C`. Containment is monotonic in the parameter only for
/// convex quadrilaterals.
///
/// The search range is always `[0, 1]`; the spans are kept for callers
/// that rescale the result.
///
/// A search that exhausts its bracket without a hit reports the bracket
/// midpoint by default. The older behavior of reporting `0` for that
/// coordinate is opt-in through `with_fallback(Fallback::Zero)`.
#[derive(Debug, Clone)]
pub struct InverseDistort {
    quadrilateral: ConvexPolygon,
    quad: [Point2; 4],
    x_span: f64,
    y_span: f64,
    tolerance: f64,
    fallback: Fallback,
}

impl InverseDistort {
    /// Creates the inverse mapping for `quadrilateral`.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::VertexCount` if the polygon does not have
    /// four sides.
    pub fn new(quadrilateral: &ConvexPolygon, x_span: f64, y_span: f64) -> Result<Self> {
        let quad = quadrilateral.quad_vertices()?;
        tracing::debug!(x_span, y_span, ?quad, "built inverse distortion");
        Ok(Self {
            quadrilateral: quadrilateral.clone(),
            quad,
            x_span,
            y_span,
            tolerance: DEFAULT_TOLERANCE,
            fallback: Fallback::default(),
        })
    }

    /// Sets the bisection tolerance, consuming `self`.
    ///
    /// # Errors
    ///
    /// See [`InverseDistort::set_tolerance`].
    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self> {
        self.set_tolerance(tolerance)?;
        Ok(self)
    }

    /// Sets the tolerance for bisection termination and alignment.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::ToleranceOutOfRange` unless
    /// `0 < tolerance <= 0.01`.
    pub fn set_tolerance(&mut self, tolerance: f64) -> Result<()> {
        if !(tolerance > 0.0 && tolerance <= MAX_TOLERANCE) {
            return Err(ArgumentError::ToleranceOutOfRange {
                value: tolerance,
                min: 0.0,
                max: MAX_TOLERANCE,
            }
            .into());
        }
        self.tolerance = tolerance;
        Ok(())
    }

    /// Sets the value reported by a search that ends without a hit.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    #[must_use]
    pub fn fallback(&self) -> Fallback {
        self.fallback
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
    pub fn quadrilateral(&self) -> &ConvexPolygon {
        &self.quadrilateral
    }

    /// Maps a point of the quadrilateral back to `[0, 1]²`.
    #[must_use]
    pub fn map(&self, point: Point2) -> Point2 {
        self.solve(point).point
    }

    /// Maps a point back to `[0, 1]²` and reports whether both searches
    /// stopped on an aligned hit.
    #[must_use]
    pub fn solve(&self, point: Point2) -> InverseSolution {
        let [a, b, c, d] = self.quad;

        let x_search = self.bisect(&point, |s| {
            let m = lerp(&a, &b, s);
            let n = lerp(&d, &c, s);
            ([a, m, n, d], m, n)
        });
        let y_search = self.bisect(&point, |t| {
            let v = lerp(&a, &d, t);
            let w = lerp(&b, &c, t);
            ([a, b, w, v], v, w)
        });

        let converged = matches!(
            (x_search, y_search),
            (Search::Hit(_), Search::Hit(_))
        );
        if !converged {
            tracing::trace!(?point, ?x_search, ?y_search, "bisection ended without a hit");
        }
        InverseSolution {
            point: Point2::new(self.resolve(x_search), self.resolve(y_search)),
            converged,
        }
    }

    /// Bisects `[0, 1]` on containment of `point` in the half polygon
    /// returned by `split`, together with its splitting segment.
    fn bisect<F>(&self, point: &Point2, split: F) -> Search
    where
        F: Fn(f64) -> ([Point2; 4], Point2, Point2),
    {
        let mut lower = 0.0;
        let mut upper = 1.0;
        while upper - lower > self.tolerance {
            let mid = (lower + upper) / 2.0;
            let (half, from, to) = split(mid);
            let half = ConvexPolygon::from_convex_unchecked(half.to_vec());
            if half.contains_point(point).inside {
                if is_aligned(&[from, *point, to], self.tolerance) {
                    return Search::Hit(mid);
                }
                upper = mid;
            } else {
                lower = mid;
            }
        }
        Search::Exhausted { lower, upper }
    }

    fn resolve(&self, search: Search) -> f64 {
        match (search, self.fallback) {
            (Search::Hit(value), _) => value,
            (Search::Exhausted { lower, upper }, Fallback::Midpoint) => (lower + upper) / 2.0,
            (Search::Exhausted { .. }, Fallback::Zero) => 0.0,
        }
    }
}

impl PlaneMapping for InverseDistort {
    fn map(&self, point: Point2) -> Point2 {
        InverseDistort::map(self, point)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::mapping::Distort;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn quad() -> ConvexPolygon {
        ConvexPolygon::new(vec![p(0.0, 0.0), p(40.0, -10.0), p(50.0, 60.0), p(5.0, 50.0)]).unwrap()
    }

    fn unit_square() -> ConvexPolygon {
        ConvexPolygon::new(vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]).unwrap()
    }

    #[test]
    fn rejects_non_quadrilaterals() {
        let tri = ConvexPolygon::new(vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)]).unwrap();
        let err = InverseDistort::new(&tri, 1.0, 1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn tolerance_range() {
        let mut inv = InverseDistort::new(&quad(), 50.0, 70.0).unwrap();
        assert_abs_diff_eq!(inv.tolerance(), 1e-6);
        for bad in [0.0, 0.02, -1e-3, f64::NAN] {
            let err = inv.set_tolerance(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{bad}");
        }
        assert_abs_diff_eq!(inv.tolerance(), 1e-6);
        inv.set_tolerance(0.01).unwrap();
        assert_abs_diff_eq!(inv.tolerance(), 0.01);
    }

    #[test]
    fn inverts_forward_distortion() {
        let q = quad();
        let forward = Distort::new(1.0, 1.0, &q).unwrap();
        let inverse = InverseDistort::new(&q, q.max_x_dist(), q.max_y_dist()).unwrap();
        for i in 1..10 {
            for j in 1..10 {
                let param = p(f64::from(i) * 0.1 + 0.013, f64::from(j) * 0.1 - 0.007);
                let back = inverse.map(forward.map(param));
                assert_abs_diff_eq!(back.x, param.x, epsilon = 2e-6);
                assert_abs_diff_eq!(back.y, param.y, epsilon = 2e-6);
            }
        }
    }

    #[test]
    fn forward_of_inverse_is_identity() {
        let q = quad();
        let forward = Distort::new(1.0, 1.0, &q).unwrap();
        let inverse = InverseDistort::new(&q, 1.0, 1.0).unwrap();
        for target in [p(20.0, 20.0), p(10.0, 40.0), p(45.0, 50.0), p(30.0, 0.0)] {
            let there = forward.map(inverse.map(target));
            assert_abs_diff_eq!(there.x, target.x, epsilon = 1e-4);
            assert_abs_diff_eq!(there.y, target.y, epsilon = 1e-4);
        }
    }

    #[test]
    fn corners_map_to_unit_corners() {
        let inverse = InverseDistort::new(&quad(), 1.0, 1.0).unwrap();
        assert_abs_diff_eq!(inverse.map(p(0.0, 0.0)), p(0.0, 0.0), epsilon = 1e-6);
        assert_abs_diff_eq!(inverse.map(p(50.0, 60.0)), p(1.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn aligned_hits_converge_exactly() {
        let inverse = InverseDistort::new(&unit_square(), 1.0, 1.0).unwrap();
        let solution = inverse.solve(p(0.5, 0.25));
        assert!(solution.converged);
        assert_eq!(solution.point, p(0.5, 0.25));
    }

    #[test]
    fn zero_fallback_is_opt_in() {
        let inverse = InverseDistort::new(&quad(), 1.0, 1.0).unwrap();
        assert_eq!(inverse.fallback(), Fallback::Midpoint);
        assert_eq!(Fallback::default(), Fallback::Midpoint);
    }

    #[test]
    fn exhausted_search_uses_fallback() {
        let q = quad();
        let forward = Distort::new(1.0, 1.0, &q).unwrap();
        let target = forward.map(p(0.3, 0.7));

        let midpoint = InverseDistort::new(&q, 1.0, 1.0).unwrap();
        let solution = midpoint.solve(target);
        assert!(!solution.converged);
        assert_abs_diff_eq!(solution.point, p(0.3, 0.7), epsilon = 2e-6);

        let zero = InverseDistort::new(&q, 1.0, 1.0)
            .unwrap()
            .with_fallback(Fallback::Zero);
        assert_eq!(zero.fallback(), Fallback::Zero);
        let solution = zero.solve(target);
        assert!(!solution.converged);
        assert_eq!(solution.point, p(0.0, 0.0));
    }

    #[test]
    fn coarser_tolerance_still_brackets() {
        let q = quad();
        let forward = Distort::new(1.0, 1.0, &q).unwrap();
        let inverse = InverseDistort::new(&q, 1.0, 1.0)
            .unwrap()
            .with_tolerance(1e-3)
            .unwrap();
        let back = inverse.map(forward.map(p(0.62, 0.41)));
        assert_abs_diff_eq!(back.x, 0.62, epsilon = 1e-3);
        assert_abs_diff_eq!(back.y, 0.41, epsilon = 1e-3);
    }

    #[test]
    fn spans_are_informational() {
        let q = quad();
        let narrow = InverseDistort::new(&q, 1.0, 1.0).unwrap();
        let wide = InverseDistort::new(&q, 500.0, 700.0).unwrap();
        assert_abs_diff_eq!(wide.x_span(), 500.0);
        assert_abs_diff_eq!(wide.y_span(), 700.0);
        let target = p(20.0, 20.0);
        assert_eq!(narrow.map(target), wide.map(target));
    }
}
