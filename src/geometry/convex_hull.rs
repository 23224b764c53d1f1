use crate::error::Result;
use crate::math::vector_2d::{cross_2d, points_from_coords, points_within};
use crate::math::{Point2, DEFAULT_TOLERANCE};

use super::ConvexPolygon;

/// Computes the convex hull of a point set by gift wrapping.
///
/// The walk starts at the leftmost point (the first one in input order
/// among equal x) and repeatedly picks the candidate that no other point
/// lies strictly to the left of. Points collinear with a hull edge are
/// kept or skipped depending on which is met first. Runs in `O(n * h)`.
pub struct ConvexHull {
    points: Vec<Point2>,
    tolerance: f64,
}

impl ConvexHull {
    /// Creates a new `ConvexHull` operation with the default vertex
    /// identity tolerance.
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self {
            points,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Creates the operation from untyped coordinate rows.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::Dimension` if a row is not 2-dimensional.
    pub fn from_coords<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        Ok(Self::new(points_from_coords(rows)?))
    }

    /// Sets the tolerance used to recognise an already recorded hull vertex.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the operation, returning the hull as a polygon.
    ///
    /// Three or fewer points are returned as given. Otherwise the hull is
    /// traversed clockwise from the leftmost point.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::EmptyPolygon` for an empty point set.
    pub fn execute(&self) -> Result<ConvexPolygon> {
        if self.points.len() <= 3 {
            return ConvexPolygon::new(self.points.clone());
        }

        let start = leftmost_point(&self.points);
        let mut hull = VertexSet::new(self.tolerance);
        hull.insert(start);

        let mut current = start;
        while let Some(next) = next_hull_vertex(&self.points, &current) {
            if hull.contains(&next) {
                break;
            }
            hull.insert(next);
            current = next;
        }

        tracing::debug!(
            points = self.points.len(),
            hull_vertices = hull.len(),
            "computed convex hull"
        );
        ConvexPolygon::new(hull.into_vec())
    }
}

impl ConvexPolygon {
    /// Returns the convex hull of `points`. See [`ConvexHull`].
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::EmptyPolygon` for an empty point set.
    pub fn convex_hull_of(points: &[Point2]) -> Result<Self> {
        ConvexHull::new(points.to_vec()).execute()
    }
}

/// Ordered set of hull vertices with tolerance-based identity.
///
/// Tolerance equality is not transitive, so membership is a linear scan
/// rather than a hash lookup.
struct VertexSet {
    vertices: Vec<Point2>,
    tolerance: f64,
}

impl VertexSet {
    fn new(tolerance: f64) -> Self {
        Self {
            vertices: Vec::new(),
            tolerance,
        }
    }

    fn contains(&self, point: &Point2) -> bool {
        self.vertices
            .iter()
            .any(|v| points_within(v, point, self.tolerance))
    }

    fn insert(&mut self, point: Point2) {
        self.vertices.push(point);
    }

    fn len(&self) -> usize {
        self.vertices.len()
    }

    fn into_vec(self) -> Vec<Point2> {
        self.vertices
    }
}

/// Returns the first point with the smallest x-coordinate.
fn leftmost_point(points: &[Point2]) -> Point2 {
    let mut best = points[0];
    for pt in &points[1..] {
        if pt.x < best.x {
            best = *pt;
        }
    }
    best
}

/// Finds the hull vertex following `current`, or `None` if every point
/// coincides with it.
fn next_hull_vertex(points: &[Point2], current: &Point2) -> Option<Point2> {
    let mut candidate = *points.iter().find(|p| *p != current)?;
    let mut edge = candidate - current;
    for pt in points {
        if pt == current {
            continue;
        }
        let pivot = pt - current;
        // `pt` lies left of the candidate edge.
        if cross_2d(&pivot, &edge) < 0.0 {
            candidate = *pt;
            edge = candidate - current;
        }
    }
    Some(candidate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn same_vertex_set(a: &[Point2], b: &[Point2]) -> bool {
        a.len() == b.len()
            && a.iter().all(|v| b.iter().any(|w| points_within(v, w, 1e-9)))
    }

    /// Deterministic points in `[0, 255)²` from a seeded LCG.
    #[allow(clippy::cast_precision_loss)]
    fn scattered_points(n: usize, mut seed: u64) -> Vec<Point2> {
        let mut next = move || {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (seed >> 11) as f64 / (1_u64 << 53) as f64 * 255.0
        };
        (0..n).map(|_| p(next(), next())).collect()
    }

    #[test]
    fn small_sets_are_returned_as_given() {
        let pts = vec![p(0.0, 0.0), p(3.0, 1.0), p(1.0, 2.0)];
        let hull = ConvexPolygon::convex_hull_of(&pts).unwrap();
        assert_eq!(hull.vertices(), pts.as_slice());
    }

    #[test]
    fn square_with_interior_points() {
        let pts = vec![
            p(0.5, 0.5),
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(0.25, 0.75),
            p(1.0, 1.0),
            p(0.0, 1.0),
        ];
        let hull = ConvexPolygon::convex_hull_of(&pts).unwrap();
        assert_eq!(
            hull.vertices(),
            &[p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0)]
        );
    }

    #[test]
    fn rehulling_is_idempotent() {
        let quad = vec![p(0.0, 0.0), p(40.0, -10.0), p(50.0, 60.0), p(5.0, 50.0)];
        let hull = ConvexPolygon::convex_hull_of(&quad).unwrap();
        assert!(same_vertex_set(hull.vertices(), &quad));

        let again = ConvexPolygon::convex_hull_of(hull.vertices()).unwrap();
        assert_eq!(again.vertices(), hull.vertices());
    }

    #[test]
    fn hull_encloses_scattered_points() {
        let pts = scattered_points(20, 6666);
        let hull = ConvexPolygon::convex_hull_of(&pts).unwrap();
        assert!(hull.n_sides() >= 3);
        for v in hull.vertices() {
            assert!(pts.contains(v), "hull vertex {v:?} is not an input point");
        }
        for pt in &pts {
            assert!(hull.contains_point(pt).inside, "{pt:?} escapes the hull");
        }
    }

    #[test]
    fn collinear_point_met_after_corner_is_skipped() {
        let pts = vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0), p(1.0, 0.0)];
        let hull = ConvexPolygon::convex_hull_of(&pts).unwrap();
        assert_eq!(hull.n_sides(), 4);
        assert!(!hull.vertices().contains(&p(1.0, 0.0)));
    }

    #[test]
    fn collinear_point_met_first_is_kept() {
        let pts = vec![p(1.0, 0.0), p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)];
        let hull = ConvexPolygon::convex_hull_of(&pts).unwrap();
        assert_eq!(
            hull.vertices(),
            &[p(0.0, 0.0), p(0.0, 2.0), p(2.0, 2.0), p(2.0, 0.0), p(1.0, 0.0)]
        );
    }

    #[test]
    fn coincident_points_collapse_to_one_vertex() {
        let pts = vec![p(1.0, 1.0); 5];
        let hull = ConvexPolygon::convex_hull_of(&pts).unwrap();
        assert_eq!(hull.vertices(), &[p(1.0, 1.0)]);
    }

    #[test]
    fn custom_tolerance_still_closes_the_loop() {
        let pts = vec![
            p(0.0, 0.0),
            p(4.0, 0.0),
            p(4.0, 4.0),
            p(0.0, 4.0),
            p(2.0, 2.0),
        ];
        let hull = ConvexHull::new(pts).with_tolerance(1e-3).execute().unwrap();
        assert_eq!(hull.n_sides(), 4);
    }

    #[test]
    fn rows_must_be_two_dimensional() {
        let err = ConvexHull::from_coords(&[vec![0.0, 0.0], vec![1.0, 2.0, 3.0]])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let hull = ConvexHull::from_coords(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]])
            .unwrap()
            .execute()
            .unwrap();
        assert_eq!(hull.n_sides(), 4);
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = ConvexPolygon::convex_hull_of(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
