use thiserror::Error;

/// Top-level error type for the quadwarp distortion engine.
#[derive(Debug, Error)]
pub enum QuadwarpError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

/// Coarse classification of a [`QuadwarpError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A polygon failed its convexity invariant.
    InvalidGeometry,
    /// An argument was malformed (vertex count, tolerance, corner order, ...).
    InvalidArgument,
    /// A lattice index or coordinate fell outside its declared span.
    OutOfRange,
    /// A required collaborator was not supplied.
    NullOrMissingMapping,
}

impl QuadwarpError {
    /// Returns the coarse kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Geometry(_) => ErrorKind::InvalidGeometry,
            Self::Argument(_) => ErrorKind::InvalidArgument,
            Self::Range(_) => ErrorKind::OutOfRange,
            Self::Mapping(_) => ErrorKind::NullOrMissingMapping,
        }
    }
}

/// Errors raised when a polygon violates its geometric invariants.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("polygon is not convex: turning direction changes at vertex {index}")]
    NotConvex { index: usize },
}

/// Errors raised for malformed arguments.
#[derive(Debug, Error)]
pub enum ArgumentError {
    #[error("a polygon needs at least one vertex")]
    EmptyPolygon,

    #[error("expected a polygon with {expected} sides, found {found}")]
    VertexCount { expected: usize, found: usize },

    #[error("tolerance {value} is out of range ({min}, {max}]")]
    ToleranceOutOfRange { value: f64, min: f64, max: f64 },

    #[error(
        "lower-left corner ({}, {}) is not below and left of upper-right corner ({}, {})",
        .lower_left.0, .lower_left.1, .upper_right.0, .upper_right.1
    )]
    CornerOrder {
        lower_left: (f64, f64),
        upper_right: (f64, f64),
    },

    #[error("point {index} has {found} coordinates, expected 2")]
    Dimension { index: usize, found: usize },

    #[error("{parameter} must be positive and finite, got {value}")]
    NonPositive { parameter: &'static str, value: f64 },

    #[error("a lattice needs at least 2 points along the {axis} axis, got {count}")]
    LatticeTooSmall { axis: &'static str, count: usize },

    #[error("no markers were loaded")]
    NoMarkers,
}

/// Errors raised when a query falls outside a declared span.
#[derive(Debug, Error)]
pub enum RangeError {
    #[error("lattice index [{row}, {col}] is outside a {rows}x{cols} lattice")]
    LatticeIndex {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("coordinate ({x}, {y}) is outside the lattice span")]
    Coordinate { x: f64, y: f64 },

    #[error("point ({x}, {y}) is outside the checkerboard frame")]
    OutsideFrame { x: f64, y: f64 },
}

/// Errors raised when assembling mappings from collaborators.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("missing collaborator: {0}")]
    Missing(&'static str),
}

/// Convenience type alias for results using [`QuadwarpError`].
pub type Result<T> = std::result::Result<T, QuadwarpError>;
