use std::path::Path;

use crate::harness::common::error::Result;
use crate::harness::ppm::types::{RasterHeader, RasterImage};

pub trait RasterReader {
    /// Parses only the header, for callers that need dimensions.
    fn read_header(&self, path: &Path) -> Result<RasterHeader>;

    /// Parses the header and returns every byte that follows it.
    fn read_raster(&self, path: &Path) -> Result<RasterImage>;
}
