mod binning;
mod field;
mod mapping;
mod pixel_pullback;
mod region;

pub use binning::{MarkersToPixels, PixelBins};
pub use field::LatticeColorField;
pub use mapping::{LatticeMapping, RowCol};
pub use pixel_pullback::PixelPullback;
pub use region::MarkersInRegion;
