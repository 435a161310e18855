//! Semantic raster comparison module
//!
//! Two rasters are equal when their decoded header fields and pixel payloads
//! match, regardless of how the header text was laid out.

mod comparator;
pub mod types;

pub use comparator::{compare_images, SemanticComparator};
pub use types::ComparisonResult;
