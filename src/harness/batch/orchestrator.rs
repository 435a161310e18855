use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, info_span, instrument, warn};

use crate::harness::{
    batch::types::BatchConfig,
    codec::{Codec, CodecConfig, ProcessCodec},
    common::error::{CodecError, FormatError},
    compare::SemanticComparator,
    metrics::{file_size, AggregateReport, TrialRecord, TrialStatus},
    ppm::{PpmReader, RasterReader},
    timing::TimeBudget,
};

/// Everything a finished batch produced.
#[derive(Debug)]
pub struct BatchOutcome {
    /// One record per started input, in processing order
    pub records: Vec<TrialRecord>,
    pub report: AggregateReport,
    /// Inputs recognised as byproducts of an earlier run
    pub skipped: Vec<PathBuf>,
    /// Inputs never started because the time budget ran out
    pub not_started: usize,
    pub elapsed: Duration,
}

impl BatchOutcome {
    pub fn budget_exhausted(&self) -> bool {
        self.not_started > 0
    }
}

pub struct BatchOrchestrator<R: RasterReader, C: Codec> {
    comparator: SemanticComparator<R>,
    codec: C,
    config: BatchConfig,
}

impl BatchOrchestrator<PpmReader, ProcessCodec> {
    pub fn new(codec: CodecConfig, config: BatchConfig) -> Self {
        Self {
            comparator: SemanticComparator::new(),
            codec: ProcessCodec::new(codec),
            config,
        }
    }
}

impl<R: RasterReader, C: Codec> BatchOrchestrator<R, C> {
    pub fn with_custom(reader: R, codec: C, config: BatchConfig) -> Self {
        Self {
            comparator: SemanticComparator::with_reader(reader),
            codec,
            config,
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    fn is_artifact(&self, input: &Path) -> bool {
        let marker = self.config.artifact_marker.as_str();
        !marker.is_empty()
            && input
                .file_name()
                .is_some_and(|name| name.to_string_lossy().contains(marker))
    }

    /// Processes `inputs` in the given order. Stops starting new inputs once
    /// the time budget is exceeded; an input already started always finishes.
    #[instrument(skip_all, fields(inputs = inputs.len()))]
    pub fn run(&self, inputs: &[PathBuf]) -> BatchOutcome {
        let budget = TimeBudget::start(self.config.time_budget);
        let mut report = AggregateReport::new(&self.config.references);
        let mut records = Vec::new();
        let mut skipped = Vec::new();
        let mut not_started = 0;

        info!(limit = ?budget.limit(), "Starting batch");

        for (index, input) in inputs.iter().enumerate() {
            if budget.expired() {
                not_started = inputs.len() - index;
                warn!(
                    elapsed = ?budget.elapsed(),
                    remaining = not_started,
                    "Time budget exhausted, not starting further inputs"
                );
                break;
            }

            if self.is_artifact(input) {
                debug!(input = %input.display(), "Skipping output of an earlier run");
                skipped.push(input.clone());
                continue;
            }

            let record = self.run_trial(input);
            report.accumulate(&record);
            records.push(record);
        }

        info!(
            processed = report.processed_count,
            failed = report.failed_count,
            elapsed = ?budget.elapsed(),
            "Batch complete"
        );

        BatchOutcome {
            records,
            report,
            skipped,
            not_started,
            elapsed: budget.elapsed(),
        }
    }

    /// Runs one input through the whole pipeline. Every failure is recorded
    /// in the returned record.
    pub fn run_trial(&self, input: &Path) -> TrialRecord {
        let file = input.file_name().unwrap_or(input.as_os_str()).to_string_lossy();
        let _trial = info_span!("trial", file = %file).entered();

        let (header, original_size) = {
            let _span = info_span!("read_header").entered();
            let header = match self.comparator.reader().read_header(input) {
                Ok(header) => header,
                Err(e) => {
                    warn!(error = %e, "Unreadable input header");
                    return TrialRecord::failed(input.to_path_buf(), TrialStatus::HeaderError(e));
                }
            };
            let Some(size) = file_size(input) else {
                let e = FormatError::IoFailure(format!("{}: cannot stat", input.display()));
                return TrialRecord::failed(input.to_path_buf(), TrialStatus::HeaderError(e));
            };
            (header, size)
        };

        self.codec.clear_artifacts(input);
        let compressed = self.codec.compressed_path(input);
        let decoded = self.codec.decoded_path(&compressed);

        let encode_duration = {
            let _span = info_span!("encode").entered();
            match self.codec.encode(input, &compressed) {
                Ok(elapsed) => elapsed,
                Err(e) => return self.codec_failure(input, e),
            }
        };

        let decode_duration = {
            let _span = info_span!("decode").entered();
            match self.codec.decode(&compressed) {
                Ok(elapsed) => elapsed,
                Err(e) => {
                    remove_decoded(&decoded);
                    return self.codec_failure(input, e);
                }
            }
        };

        if !decoded.exists() {
            return self.codec_failure(input, CodecError::MissingOutput(decoded));
        }

        let result = {
            let _span = info_span!("compare").entered();
            self.comparator.compare(input, &decoded)
        };
        remove_decoded(&decoded);

        let _span = info_span!("measure").entered();
        let Some(compressed_size) = file_size(&compressed) else {
            return self.codec_failure(input, CodecError::MissingOutput(compressed));
        };
        let reference_sizes = self
            .config
            .references
            .iter()
            .map(|codec| (codec.name.clone(), codec.artifact_size(input)))
            .collect();

        let record = TrialRecord {
            input: input.to_path_buf(),
            pixel_count: Some(header.pixel_count()),
            original_size: Some(original_size),
            compressed_size: Some(compressed_size),
            reference_sizes,
            status: TrialStatus::Compared(result),
            encode_duration,
            decode_duration,
        };

        if record.status.is_success() {
            info!(
                original = original_size,
                compressed = compressed_size,
                bpp = record.bits_per_pixel(),
                "Round trip verified"
            );
        } else {
            warn!(status = record.status.token(), "Round trip did not reproduce the input");
        }
        record
    }

    fn codec_failure(&self, input: &Path, err: CodecError) -> TrialRecord {
        warn!(error = %err, "Codec step failed");
        TrialRecord::failed(input.to_path_buf(), TrialStatus::CodecFailed(err))
    }
}

fn remove_decoded(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "Removed decoded output"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "Could not remove decoded output"),
    }
}
