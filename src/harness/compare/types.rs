use crate::harness::common::error::FormatError;

/// Outcome of comparing two rasters, in the priority order it is evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonResult {
    Equal,
    ReadErrorFirst(FormatError),
    ReadErrorSecond(FormatError),
    DimensionMismatch {
        first: (usize, usize),
        second: (usize, usize),
    },
    MaxValueMismatch { first: u32, second: u32 },
    /// Payloads differ in length or content. `offset` is the first differing
    /// byte, or the shorter length when one payload is a prefix of the other.
    PixelMismatch { offset: usize },
}

impl ComparisonResult {
    pub fn is_equal(&self) -> bool {
        matches!(self, ComparisonResult::Equal)
    }
}
