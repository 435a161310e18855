use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use llr_bench::harness::{
    parse_time_budget, report, BatchConfig, BatchOrchestrator, CodecConfig, ReferenceCodec,
};
use llr_bench::logger::{self, debug, error, info, warn};

const DEFAULT_INPUTS: &[&str] = &["samples/ppm", "samples/test_nut_extracted"];
const INPUT_EXTENSIONS: &[&str] = &["ppm", "pnm"];

/// Round-trip benchmark for a lossless PPM encoder/decoder pair
#[derive(Parser, Debug)]
#[command(name = "llr-bench", version, about)]
struct Args {
    /// Encoder executable, called as `ENCODER <input> <output>`
    #[arg(long, default_value = "build/llrice-c")]
    encoder: PathBuf,
    /// Decoder executable, called as `DECODER <compressed>`
    #[arg(long, default_value = "build/llrice-d")]
    decoder: PathBuf,
    /// Suffix appended to an input to name its compressed file
    #[arg(long, default_value = ".llr")]
    suffix: String,
    /// Suffix the decoder appends to the compressed file name
    #[arg(long, default_value = ".ppm")]
    decoded_suffix: String,
    /// Reference codec as NAME=EXT[@DIR]; repeatable
    #[arg(long = "reference", default_value = "nut=nut@build")]
    references: Vec<ReferenceCodec>,
    /// Stop starting new inputs after this long (seconds, or with s/m/h suffix)
    #[arg(long)]
    time_budget: Option<String>,
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
    /// Directories to scan for rasters, or individual raster files
    inputs: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(if args.verbose { "debug" } else { "warn" });

    let time_budget = match args.time_budget.as_deref().map(parse_time_budget) {
        Some(Ok(budget)) => budget,
        Some(Err(e)) => {
            warn!("{e}; running without a time budget");
            None
        }
        None => None,
    };

    let roots: Vec<PathBuf> = if args.inputs.is_empty() {
        DEFAULT_INPUTS.iter().map(PathBuf::from).collect()
    } else {
        args.inputs
    };
    let inputs = collect_inputs(&roots)?;
    info!(count = inputs.len(), "Collected inputs");

    let codec = CodecConfig::builder()
        .encoder(args.encoder)
        .decoder(args.decoder)
        .compressed_suffix(args.suffix.clone())
        .decoded_suffix(args.decoded_suffix)
        .build();
    let config = BatchConfig::builder()
        .time_budget(time_budget)
        .artifact_marker(args.suffix)
        .references(args.references)
        .build();

    let orchestrator = BatchOrchestrator::new(codec, config);
    let codec = orchestrator.codec().config();
    info!("Encoder: {}", codec.encoder.display());
    info!("Decoder: {}", codec.decoder.display());
    info!("Time budget: {:?}", orchestrator.config().time_budget);
    for reference in &orchestrator.config().references {
        info!(
            "Reference {}: *.{} in {}",
            reference.name,
            reference.extension,
            reference.directory.display()
        );
    }

    let outcome = orchestrator.run(&inputs);

    let mut stdout = std::io::stdout().lock();
    report::write_report(&mut stdout, &outcome).context("failed to write report")?;

    if outcome.report.failed_count > 0 {
        error!(failed = outcome.report.failed_count, "Some inputs did not round-trip");
    }
    Ok(())
}

/// Expands directories into their raster files; the result is sorted and
/// free of duplicates.
fn collect_inputs(roots: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut inputs = BTreeSet::new();
    for root in roots {
        if root.is_file() {
            inputs.insert(root.clone());
            continue;
        }
        if !root.is_dir() {
            warn!(path = %root.display(), "Input path does not exist, skipping");
            continue;
        }

        let entries = std::fs::read_dir(root)
            .with_context(|| format!("failed to list {}", root.display()))?;
        for entry in entries {
            let path = entry
                .with_context(|| format!("failed to list {}", root.display()))?
                .path();
            if path.is_file() && has_raster_extension(&path) {
                inputs.insert(path);
            } else {
                debug!(path = %path.display(), "Ignoring non-raster entry");
            }
        }
    }
    Ok(inputs.into_iter().collect())
}

fn has_raster_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| INPUT_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}
