use crate::error::{MappingError, Result};
use crate::geometry::{ConvexPolygon, RectPolygon};
use crate::math::vector_2d::bilinear;
use crate::math::Point2;

use super::{ensure_positive, ColorField, PlaneMapping};

/// Pullback of a color field on a distorted quadrilateral onto its
/// corrected rectangle.
///
/// Given the forward mapping `f: rectangle -> quadrilateral` and a color
/// field `g` on the quadrilateral, the pullback is `g(f(p))`. Sampling the
/// corrected rectangle this way assigns every corrected point a color,
/// which inverse-mapping discrete pixels would not.
///
/// For a point `(x, y)` of the corrected domain:
///
/// ```text
/// t = (x - x_min) / x_span,  s = (y - y_min) / y_span
/// M = (1 - t) A + t B,  N = (1 - t) D + t C
/// P = (1 - s) M + s N
/// ```
#[derive(Clone)]
pub struct PullbackCorrection<F> {
    quadrilateral: ConvexPolygon,
    quad: [Point2; 4],
    corrected_domain: RectPolygon,
    color_field: F,
}

impl<F> PullbackCorrection<F> {
    /// Creates the pullback of `color_field` onto `corrected_domain`.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::VertexCount` if the quadrilateral does not
    /// have four sides, or `ArgumentError::NonPositive` if the corrected
    /// domain has zero width or height.
    pub fn new(
        quadrilateral: ConvexPolygon,
        corrected_domain: RectPolygon,
        color_field: F,
    ) -> Result<Self> {
        let quad = quadrilateral.quad_vertices()?;
        ensure_positive("corrected domain x-span", corrected_domain.x_span())?;
        ensure_positive("corrected domain y-span", corrected_domain.y_span())?;
        tracing::debug!(
            ?quad,
            x_span = corrected_domain.x_span(),
            y_span = corrected_domain.y_span(),
            "built pullback correction"
        );
        Ok(Self {
            quadrilateral,
            quad,
            corrected_domain,
            color_field,
        })
    }

    /// Returns a builder that reports missing collaborators.
    #[must_use]
    pub fn builder() -> PullbackBuilder<F> {
        PullbackBuilder::default()
    }

    #[must_use]
    pub fn quadrilateral(&self) -> &ConvexPolygon {
        &self.quadrilateral
    }

    #[must_use]
    pub fn corrected_domain(&self) -> &RectPolygon {
        &self.corrected_domain
    }

    #[must_use]
    pub fn color_field(&self) -> &F {
        &self.color_field
    }

    /// Maps a point of the corrected domain into the quadrilateral.
    #[must_use]
    pub fn map_to_quadrilateral(&self, point: Point2) -> Point2 {
        let domain = &self.corrected_domain;
        let t = (point.x - domain.x_min()) / domain.x_span();
        let s = (point.y - domain.y_min()) / domain.y_span();
        bilinear(&self.quad, t, s)
    }
}

impl<F> std::fmt::Debug for PullbackCorrection<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PullbackCorrection")
            .field("quadrilateral", &self.quadrilateral)
            .field("corrected_domain", &self.corrected_domain)
            .finish_non_exhaustive()
    }
}

impl<F: ColorField> PullbackCorrection<F> {
    /// Returns the color of the corrected image at `point`.
    #[must_use]
    pub fn corrected_visualization(&self, point: Point2) -> F::Color {
        self.color_field.color_at(self.map_to_quadrilateral(point))
    }
}

impl<F> PlaneMapping for PullbackCorrection<F> {
    fn map(&self, point: Point2) -> Point2 {
        self.map_to_quadrilateral(point)
    }
}

/// Assembles a [`PullbackCorrection`] piece by piece.
pub struct PullbackBuilder<F> {
    quadrilateral: Option<ConvexPolygon>,
    corrected_domain: Option<RectPolygon>,
    color_field: Option<F>,
}

impl<F> Default for PullbackBuilder<F> {
    fn default() -> Self {
        Self {
            quadrilateral: None,
            corrected_domain: None,
            color_field: None,
        }
    }
}

impl<F> PullbackBuilder<F> {
    #[must_use]
    pub fn quadrilateral(mut self, quadrilateral: ConvexPolygon) -> Self {
        self.quadrilateral = Some(quadrilateral);
        self
    }

    #[must_use]
    pub fn corrected_domain(mut self, corrected_domain: RectPolygon) -> Self {
        self.corrected_domain = Some(corrected_domain);
        self
    }

    #[must_use]
    pub fn color_field(mut self, color_field: F) -> Self {
        self.color_field = Some(color_field);
        self
    }

    /// Builds the pullback.
    ///
    /// # Errors
    ///
    /// Returns `MappingError::Missing` naming the first collaborator that
    /// was not supplied, or any error of [`PullbackCorrection::new`].
    pub fn build(self) -> Result<PullbackCorrection<F>> {
        let quadrilateral = self
            .quadrilateral
            .ok_or(MappingError::Missing("quadrilateral"))?;
        let corrected_domain = self
            .corrected_domain
            .ok_or(MappingError::Missing("corrected domain"))?;
        let color_field = self
            .color_field
            .ok_or(MappingError::Missing("color field"))?;
        PullbackCorrection::new(quadrilateral, corrected_domain, color_field)
    }
}
