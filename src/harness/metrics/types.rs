//! Per-input records and the batch aggregate

use std::path::PathBuf;
use std::time::Duration;

use crate::harness::common::error::{CodecError, CodecStage, FormatError};
use crate::harness::compare::ComparisonResult;
use crate::harness::metrics::engine::{bits_per_pixel, ratio_percent};
use crate::harness::metrics::reference::ReferenceCodec;

/// How far a single input got through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialStatus {
    /// Round trip completed and was compared; sizes were measured.
    Compared(ComparisonResult),
    /// The input could not be read as a P6 raster.
    HeaderError(FormatError),
    CodecFailed(CodecError),
}

impl TrialStatus {
    pub fn is_measured(&self) -> bool {
        matches!(self, TrialStatus::Compared(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TrialStatus::Compared(result) if result.is_equal())
    }

    /// Short status-column token, distinct for every failure class.
    pub fn token(&self) -> &'static str {
        match self {
            TrialStatus::Compared(result) => match result {
                ComparisonResult::Equal => "OK",
                ComparisonResult::PixelMismatch { .. } => "DIFF!",
                ComparisonResult::DimensionMismatch { .. } => "DIM",
                ComparisonResult::MaxValueMismatch { .. } => "MAXVAL",
                ComparisonResult::ReadErrorFirst(_) => "READ1",
                ComparisonResult::ReadErrorSecond(_) => "READ2",
            },
            TrialStatus::HeaderError(_) => "HDR ERR",
            TrialStatus::CodecFailed(err) => match err {
                CodecError::EncodeFailed { .. } => "ERR (C)",
                CodecError::DecodeFailed { .. } => "ERR (D)",
                CodecError::LaunchFailed { stage: CodecStage::Encode, .. } => "LAUNCH (C)",
                CodecError::LaunchFailed { stage: CodecStage::Decode, .. } => "LAUNCH (D)",
                CodecError::MissingOutput(_) => "MISSING",
            },
        }
    }
}

/// Outcome of one input. Sizes are only known once the trial was measured.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialRecord {
    pub input: PathBuf,
    pub pixel_count: Option<u64>,
    pub original_size: Option<u64>,
    pub compressed_size: Option<u64>,
    /// One entry per configured reference codec, in configuration order
    pub reference_sizes: Vec<(String, Option<u64>)>,
    pub status: TrialStatus,
    pub encode_duration: Duration,
    pub decode_duration: Duration,
}

impl TrialRecord {
    /// A trial that stopped before measurement.
    pub fn failed(input: PathBuf, status: TrialStatus) -> Self {
        Self {
            input,
            pixel_count: None,
            original_size: None,
            compressed_size: None,
            reference_sizes: Vec::new(),
            status,
            encode_duration: Duration::ZERO,
            decode_duration: Duration::ZERO,
        }
    }

    pub fn ratio_percent(&self) -> Option<f64> {
        ratio_percent(self.compressed_size?, self.original_size?)
    }

    pub fn bits_per_pixel(&self) -> Option<f64> {
        bits_per_pixel(self.compressed_size?, self.pixel_count?)
    }

    pub fn reference_size(&self, name: &str) -> Option<u64> {
        self.reference_sizes
            .iter()
            .find(|(codec, _)| codec == name)
            .and_then(|(_, size)| *size)
    }

    pub fn reference_bits_per_pixel(&self, name: &str) -> Option<f64> {
        bits_per_pixel(self.reference_size(name)?, self.pixel_count?)
    }
}

/// Running totals for one reference codec over the inputs it has artifacts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTotals {
    pub name: String,
    pub bytes: u64,
    pub pixels: u64,
    pub files: usize,
}

impl ReferenceTotals {
    pub fn bits_per_pixel(&self) -> Option<f64> {
        bits_per_pixel(self.bytes, self.pixels)
    }
}

/// Sums over every trial processed before the batch stopped.
///
/// Bits per pixel are derived from summed bytes over summed pixels, never
/// from the mean of per-file values.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    pub total_original_bytes: u64,
    pub total_compressed_bytes: u64,
    pub total_pixels: u64,
    pub references: Vec<ReferenceTotals>,
    pub total_encode: Duration,
    pub total_decode: Duration,
    pub processed_count: usize,
    pub measured_count: usize,
    pub failed_count: usize,
}

impl AggregateReport {
    pub fn new(references: &[ReferenceCodec]) -> Self {
        Self {
            total_original_bytes: 0,
            total_compressed_bytes: 0,
            total_pixels: 0,
            references: references
                .iter()
                .map(|codec| ReferenceTotals {
                    name: codec.name.clone(),
                    bytes: 0,
                    pixels: 0,
                    files: 0,
                })
                .collect(),
            total_encode: Duration::ZERO,
            total_decode: Duration::ZERO,
            processed_count: 0,
            measured_count: 0,
            failed_count: 0,
        }
    }

    pub fn accumulate(&mut self, record: &TrialRecord) {
        self.processed_count += 1;
        if !record.status.is_success() {
            self.failed_count += 1;
        }
        if !record.status.is_measured() {
            return;
        }

        let pixels = record.pixel_count.unwrap_or(0);
        self.measured_count += 1;
        self.total_original_bytes += record.original_size.unwrap_or(0);
        self.total_compressed_bytes += record.compressed_size.unwrap_or(0);
        self.total_pixels += pixels;
        self.total_encode += record.encode_duration;
        self.total_decode += record.decode_duration;

        for totals in &mut self.references {
            if let Some(size) = record.reference_size(&totals.name) {
                totals.bytes += size;
                totals.pixels += pixels;
                totals.files += 1;
            }
        }
    }

    pub fn bits_per_pixel(&self) -> Option<f64> {
        bits_per_pixel(self.total_compressed_bytes, self.total_pixels)
    }

    pub fn ratio_percent(&self) -> Option<f64> {
        ratio_percent(self.total_compressed_bytes, self.total_original_bytes)
    }

    pub fn reference(&self, name: &str) -> Option<&ReferenceTotals> {
        self.references.iter().find(|totals| totals.name == name)
    }

    /// Original raster bytes encoded per second.
    pub fn encode_throughput(&self) -> Option<f64> {
        throughput(self.total_original_bytes, self.total_encode)
    }

    /// Original raster bytes reproduced per second.
    pub fn decode_throughput(&self) -> Option<f64> {
        throughput(self.total_original_bytes, self.total_decode)
    }
}

fn throughput(bytes: u64, elapsed: Duration) -> Option<f64> {
    let seconds = elapsed.as_secs_f64();
    (seconds > 0.0).then(|| bytes as f64 / seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measured(name: &str, pixels: u64, compressed: u64, nut: Option<u64>) -> TrialRecord {
        TrialRecord {
            input: PathBuf::from(name),
            pixel_count: Some(pixels),
            original_size: Some(pixels * 3 + 15),
            compressed_size: Some(compressed),
            reference_sizes: vec![("nut".to_string(), nut)],
            status: TrialStatus::Compared(ComparisonResult::Equal),
            encode_duration: Duration::from_millis(100),
            decode_duration: Duration::from_millis(50),
        }
    }

    #[test]
    fn reference_bpp_is_pooled_not_averaged() {
        let mut report = AggregateReport::new(&[ReferenceCodec::new("nut", "nut", ".")]);
        report.accumulate(&measured("a.ppm", 100, 60, Some(50)));
        report.accumulate(&measured("b.ppm", 300, 100, Some(150)));
        report.accumulate(&measured("c.ppm", 1000, 10, None));

        let nut = report.reference("nut").unwrap();
        assert_eq!(nut.bytes, 200);
        assert_eq!(nut.pixels, 400);
        assert_eq!(nut.files, 2);
        assert_eq!(nut.bits_per_pixel(), Some(4.0));

        // The codec under test has very uneven per-file densities.
        assert_eq!(report.total_pixels, 1400);
        assert_eq!(report.bits_per_pixel(), Some(170.0 * 8.0 / 1400.0));
        let mean_of_files = (4.8 + 100.0 * 8.0 / 300.0 + 0.08) / 3.0;
        assert_ne!(report.bits_per_pixel(), Some(mean_of_files));
    }

    #[test]
    fn failures_count_but_do_not_add_sizes() {
        let mut report = AggregateReport::new(&[]);
        report.accumulate(&measured("a.ppm", 100, 60, None));
        report.accumulate(&TrialRecord::failed(
            PathBuf::from("b.ppm"),
            TrialStatus::CodecFailed(CodecError::EncodeFailed { code: Some(1) }),
        ));
        let mut diff = measured("c.ppm", 100, 70, None);
        diff.status = TrialStatus::Compared(ComparisonResult::PixelMismatch { offset: 0 });
        report.accumulate(&diff);

        assert_eq!(report.processed_count, 3);
        assert_eq!(report.measured_count, 2);
        assert_eq!(report.failed_count, 2);
        assert_eq!(report.total_compressed_bytes, 130);
        assert_eq!(report.total_encode, Duration::from_millis(200));
    }

    #[test]
    fn throughput_from_original_bytes() {
        let mut report = AggregateReport::new(&[]);
        report.accumulate(&measured("a.ppm", 1000, 600, None));
        assert_eq!(report.encode_throughput(), Some(3015.0 / 0.1));
        assert_eq!(report.decode_throughput(), Some(3015.0 / 0.05));
        assert_eq!(AggregateReport::new(&[]).encode_throughput(), None);
    }

    #[test]
    fn every_status_has_its_own_token() {
        let statuses = [
            TrialStatus::Compared(ComparisonResult::Equal),
            TrialStatus::Compared(ComparisonResult::PixelMismatch { offset: 1 }),
            TrialStatus::Compared(ComparisonResult::DimensionMismatch { first: (1, 1), second: (2, 2) }),
            TrialStatus::Compared(ComparisonResult::MaxValueMismatch { first: 255, second: 1023 }),
            TrialStatus::Compared(ComparisonResult::ReadErrorFirst(FormatError::NotP6)),
            TrialStatus::Compared(ComparisonResult::ReadErrorSecond(FormatError::NotP6)),
            TrialStatus::HeaderError(FormatError::NotP6),
            TrialStatus::CodecFailed(CodecError::EncodeFailed { code: Some(1) }),
            TrialStatus::CodecFailed(CodecError::DecodeFailed { code: Some(1) }),
            TrialStatus::CodecFailed(CodecError::LaunchFailed { stage: CodecStage::Encode, message: String::new() }),
            TrialStatus::CodecFailed(CodecError::LaunchFailed { stage: CodecStage::Decode, message: String::new() }),
            TrialStatus::CodecFailed(CodecError::MissingOutput(PathBuf::from("x"))),
        ];
        let mut tokens: Vec<_> = statuses.iter().map(TrialStatus::token).collect();
        tokens.sort();
        tokens.dedup();
        assert_eq!(tokens.len(), statuses.len());
    }
}
