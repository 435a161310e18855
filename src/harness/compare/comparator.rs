use std::path::Path;

use tracing::debug;

use crate::harness::compare::types::ComparisonResult;
use crate::harness::ppm::{PpmReader, RasterImage, RasterReader};

pub struct SemanticComparator<R: RasterReader = PpmReader> {
    reader: R,
}

impl SemanticComparator<PpmReader> {
    pub fn new() -> Self {
        Self { reader: PpmReader }
    }
}

impl Default for SemanticComparator<PpmReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RasterReader> SemanticComparator<R> {
    pub fn with_reader(reader: R) -> Self {
        Self { reader }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Reads both files and compares them. A read failure on either side
    /// short-circuits before any field is looked at.
    pub fn compare(&self, first: &Path, second: &Path) -> ComparisonResult {
        let first_image = match self.reader.read_raster(first) {
            Ok(image) => image,
            Err(e) => return ComparisonResult::ReadErrorFirst(e),
        };
        let second_image = match self.reader.read_raster(second) {
            Ok(image) => image,
            Err(e) => return ComparisonResult::ReadErrorSecond(e),
        };

        let result = compare_images(&first_image, &second_image);
        debug!(
            first = %first.display(),
            second = %second.display(),
            ?result,
            "Compared rasters"
        );
        result
    }
}

/// Dimensions first, then max value, then payload.
pub fn compare_images(first: &RasterImage, second: &RasterImage) -> ComparisonResult {
    let (a, b) = (&first.header, &second.header);

    if a.width != b.width || a.height != b.height {
        return ComparisonResult::DimensionMismatch {
            first: (a.width, a.height),
            second: (b.width, b.height),
        };
    }

    if a.max_value != b.max_value {
        return ComparisonResult::MaxValueMismatch {
            first: a.max_value,
            second: b.max_value,
        };
    }

    match first_difference(&first.payload, &second.payload) {
        Some(offset) => ComparisonResult::PixelMismatch { offset },
        None => ComparisonResult::Equal,
    }
}

fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    if let Some(offset) = a.iter().zip(b).position(|(x, y)| x != y) {
        return Some(offset);
    }
    (a.len() != b.len()).then(|| a.len().min(b.len()))
}
