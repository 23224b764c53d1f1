use super::{Matrix2, Point2, Vector2};
use crate::error::{ArgumentError, Result};

/// Directed area of the parallelogram spanned by `v1` and `v2`.
///
/// This is `|v1| |v2| sin(theta)` where `theta` is the counter-clockwise
/// angle from `v1` to `v2`: positive when `v2` turns left of `v1`.
#[must_use]
pub fn cross_2d(v1: &Vector2, v2: &Vector2) -> f64 {
    Matrix2::from_columns(&[*v1, *v2]).determinant()
}

/// Linear interpolation `(1 - s) * a + s * b`.
#[must_use]
pub fn lerp(a: &Point2, b: &Point2, s: f64) -> Point2 {
    Point2::from(a.coords * (1.0 - s) + b.coords * s)
}

/// Bilinear patch over the quadrilateral `a, b, c, d`.
///
/// `u` runs along `a -> b` (and `d -> c`), `v` runs along `a -> d`
/// (and `b -> c`). The formula is defined on all of R², so parameters
/// outside `[0, 1]` extrapolate.
#[must_use]
pub fn bilinear(quad: &[Point2; 4], u: f64, v: f64) -> Point2 {
    let [a, b, c, d] = quad;
    let m = lerp(a, b, u);
    let n = lerp(d, c, u);
    lerp(&m, &n, v)
}

/// Coordinate equality within `tolerance` on each axis.
///
/// Not transitive; use it with a linear scan, never as a hash key.
#[must_use]
pub fn points_within(a: &Point2, b: &Point2, tolerance: f64) -> bool {
    (a.x - b.x).abs() <= tolerance && (a.y - b.y).abs() <= tolerance
}

/// Returns `true` if `v1` and `v2` are parallel within `tolerance`.
#[must_use]
pub fn is_parallel(v1: &Vector2, v2: &Vector2, tolerance: f64) -> bool {
    (v1.x * v2.y - v1.y * v2.x).abs() <= tolerance
}

/// Returns `true` if all `points` lie on one line.
///
/// Every vector from the first point must be parallel to the reference
/// vector from the first to the second point. Two or fewer points are
/// always aligned.
#[must_use]
pub fn is_aligned(points: &[Point2], tolerance: f64) -> bool {
    if points.len() <= 2 {
        return true;
    }
    let reference = points[1] - points[0];
    points[2..]
        .iter()
        .all(|p| is_parallel(&reference, &(p - points[0]), tolerance))
}

/// Builds points from untyped coordinate rows.
///
/// # Errors
///
/// Returns `ArgumentError::Dimension` if a row does not hold exactly two
/// coordinates.
pub fn points_from_coords<R: AsRef<[f64]>>(rows: &[R]) -> Result<Vec<Point2>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| match row.as_ref() {
            &[x, y] => Ok(Point2::new(x, y)),
            other => Err(ArgumentError::Dimension {
                index,
                found: other.len(),
            }
            .into()),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::math::TOLERANCE;

    #[test]
    fn cross_sign_follows_turn() {
        let x = Vector2::new(1.0, 0.0);
        let y = Vector2::new(0.0, 1.0);
        assert!((cross_2d(&x, &y) - 1.0).abs() < TOLERANCE);
        assert!((cross_2d(&y, &x) + 1.0).abs() < TOLERANCE);
        assert!(cross_2d(&x, &(x * 3.0)).abs() < TOLERANCE);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(4.0, -2.0);
        assert_eq!(lerp(&a, &b, 0.0), a);
        assert_eq!(lerp(&a, &b, 1.0), b);
        let mid = lerp(&a, &b, 0.5);
        assert!((mid.x - 2.0).abs() < TOLERANCE);
        assert!((mid.y + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn bilinear_hits_corners() {
        let quad = [
            Point2::new(0.0, 0.0),
            Point2::new(40.0, -10.0),
            Point2::new(50.0, 60.0),
            Point2::new(5.0, 50.0),
        ];
        assert_eq!(bilinear(&quad, 0.0, 0.0), quad[0]);
        assert_eq!(bilinear(&quad, 1.0, 0.0), quad[1]);
        assert_eq!(bilinear(&quad, 1.0, 1.0), quad[2]);
        assert_eq!(bilinear(&quad, 0.0, 1.0), quad[3]);
    }

    #[test]
    fn bilinear_extrapolates() {
        let quad = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let p = bilinear(&quad, 2.0, -1.0);
        assert!((p.x - 2.0).abs() < TOLERANCE);
        assert!((p.y + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn within_tolerance() {
        let a = Point2::new(1.0, 1.0);
        assert!(points_within(&a, &Point2::new(1.0 + 5e-7, 1.0 - 5e-7), 1e-6));
        assert!(!points_within(&a, &Point2::new(1.0 + 2e-6, 1.0), 1e-6));
    }

    #[test]
    fn alignment() {
        let on_line = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(3.0, 3.0),
            Point2::new(-2.0, -2.0),
        ];
        assert!(is_aligned(&on_line, 1e-9));

        let off_line = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(3.0, 3.1),
        ];
        assert!(!is_aligned(&off_line, 1e-9));
        assert!(is_aligned(&off_line[..2], 1e-9));
    }

    #[test]
    fn coords_dimension_checked() {
        let pts = points_from_coords(&[vec![0.0, 1.0], vec![2.0, 3.0]]).unwrap();
        assert_eq!(pts, vec![Point2::new(0.0, 1.0), Point2::new(2.0, 3.0)]);

        let err = points_from_coords(&[vec![0.0, 1.0], vec![2.0, 3.0, 4.0]]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("point 1 has 3 coordinates"));
    }
}
