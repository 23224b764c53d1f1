mod convex_hull;
mod convex_polygon;
mod rect_polygon;

pub use convex_hull::ConvexHull;
pub use convex_polygon::{Containment, ConvexPolygon};
pub use rect_polygon::RectPolygon;
