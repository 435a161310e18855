//! Size metrics module
//!
//! Per-file compression ratio and bits-per-pixel, reference codec lookup and
//! the batch-wide aggregate built from trial records.

mod engine;
mod reference;
pub mod types;

pub use engine::{bits_per_pixel, file_size, ratio_percent};
pub use reference::{ReferenceCodec, ReferenceParseError};
pub use types::{AggregateReport, ReferenceTotals, TrialRecord, TrialStatus};
