pub mod error;
pub mod geometry;
pub mod lattice;
pub mod mapping;
pub mod math;

pub use error::{ErrorKind, QuadwarpError, Result};
