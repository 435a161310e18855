//! Console report
//!
//! Fixed-width table with one row per trial and a totals row, followed by a
//! performance summary.

use std::io::{self, Write};

use crate::harness::batch::BatchOutcome;
use crate::harness::metrics::{AggregateReport, TrialRecord};

const FILE_WIDTH: usize = 45;
const SIZE_WIDTH: usize = 15;
const BPP_WIDTH: usize = 8;
const RATIO_WIDTH: usize = 10;
const STATUS_WIDTH: usize = 10;
const NOT_AVAILABLE: &str = "N/A";
const EMPTY: &str = "-";

pub fn write_report(out: &mut dyn Write, outcome: &BatchOutcome) -> io::Result<()> {
    let names: Vec<&str> = outcome
        .report
        .references
        .iter()
        .map(|totals| totals.name.as_str())
        .collect();

    write_header(out, &names)?;
    for record in &outcome.records {
        write_row(out, record, &names)?;
    }
    write_rule(out, names.len())?;
    write_totals(out, &outcome.report)?;
    writeln!(out)?;
    write_performance(out, outcome)
}

fn write_header(out: &mut dyn Write, names: &[&str]) -> io::Result<()> {
    write!(
        out,
        "| {:<FILE_WIDTH$} | {:>SIZE_WIDTH$} | {:>SIZE_WIDTH$} | {:>BPP_WIDTH$} |",
        "File", "Original", "Compressed", "BPP"
    )?;
    for name in names {
        write!(
            out,
            " {:>SIZE_WIDTH$} | {:>BPP_WIDTH$} |",
            fit(&format!("{name} size"), SIZE_WIDTH),
            fit(&format!("{name} BPP"), BPP_WIDTH)
        )?;
    }
    writeln!(out, " {:>RATIO_WIDTH$} | {:<STATUS_WIDTH$} |", "Ratio", "Status")?;
    write_rule(out, names.len())
}

fn write_rule(out: &mut dyn Write, references: usize) -> io::Result<()> {
    write!(
        out,
        "|{:-<a$}|{:-<b$}|{:-<b$}|{:-<c$}|",
        "",
        "",
        "",
        "",
        a = FILE_WIDTH + 2,
        b = SIZE_WIDTH + 2,
        c = BPP_WIDTH + 2
    )?;
    for _ in 0..references {
        write!(out, "{:-<b$}|{:-<c$}|", "", "", b = SIZE_WIDTH + 2, c = BPP_WIDTH + 2)?;
    }
    writeln!(out, "{:-<r$}|{:-<s$}|", "", "", r = RATIO_WIDTH + 2, s = STATUS_WIDTH + 2)
}

fn write_row(out: &mut dyn Write, record: &TrialRecord, names: &[&str]) -> io::Result<()> {
    let file = record
        .input
        .file_name()
        .unwrap_or(record.input.as_os_str())
        .to_string_lossy();

    write!(
        out,
        "| {:<FILE_WIDTH$} | {:>SIZE_WIDTH$} | {:>SIZE_WIDTH$} | {:>BPP_WIDTH$} |",
        file,
        size_or(record.original_size, EMPTY),
        size_or(record.compressed_size, EMPTY),
        bpp_or(record.bits_per_pixel(), EMPTY)
    )?;
    for name in names {
        // Reference artifacts are only looked up for measured trials.
        let missing = if record.status.is_measured() { NOT_AVAILABLE } else { EMPTY };
        write!(
            out,
            " {:>SIZE_WIDTH$} | {:>BPP_WIDTH$} |",
            size_or(record.reference_size(name), missing),
            bpp_or(record.reference_bits_per_pixel(name), missing)
        )?;
    }
    writeln!(
        out,
        " {:>RATIO_WIDTH$} | {:<STATUS_WIDTH$} |",
        percent_or(record.ratio_percent(), EMPTY),
        record.status.token()
    )
}

fn write_totals(out: &mut dyn Write, report: &AggregateReport) -> io::Result<()> {
    let label = format!("TOTAL ({} of {} measured)", report.measured_count, report.processed_count);
    write!(
        out,
        "| {:<FILE_WIDTH$} | {:>SIZE_WIDTH$} | {:>SIZE_WIDTH$} | {:>BPP_WIDTH$} |",
        label,
        group_thousands(report.total_original_bytes),
        group_thousands(report.total_compressed_bytes),
        bpp_or(report.bits_per_pixel(), EMPTY)
    )?;
    for totals in &report.references {
        let size = if totals.files > 0 {
            group_thousands(totals.bytes)
        } else {
            NOT_AVAILABLE.to_string()
        };
        write!(
            out,
            " {:>SIZE_WIDTH$} | {:>BPP_WIDTH$} |",
            size,
            bpp_or(totals.bits_per_pixel(), NOT_AVAILABLE)
        )?;
    }
    let status = if report.failed_count == 0 {
        "OK".to_string()
    } else {
        format!("{} FAIL", report.failed_count)
    };
    writeln!(
        out,
        " {:>RATIO_WIDTH$} | {:<STATUS_WIDTH$} |",
        percent_or(report.ratio_percent(), EMPTY),
        status
    )
}

fn write_performance(out: &mut dyn Write, outcome: &BatchOutcome) -> io::Result<()> {
    let report = &outcome.report;
    writeln!(out, "Performance")?;
    writeln!(out, "{:-<44}", "")?;
    writeln!(out, "{:<10} {:>14} {:>18}", "Stage", "Time (s)", "Throughput")?;
    writeln!(
        out,
        "{:<10} {:>14.3} {:>18}",
        "Encode",
        report.total_encode.as_secs_f64(),
        megabytes_per_second(report.encode_throughput())
    )?;
    writeln!(
        out,
        "{:<10} {:>14.3} {:>18}",
        "Decode",
        report.total_decode.as_secs_f64(),
        megabytes_per_second(report.decode_throughput())
    )?;
    writeln!(out, "{:-<44}", "")?;

    if !outcome.skipped.is_empty() {
        writeln!(out, "Skipped {} output(s) of earlier runs", outcome.skipped.len())?;
    }
    if outcome.budget_exhausted() {
        writeln!(
            out,
            "Time budget reached after {:.2}s: {} input(s) not started",
            outcome.elapsed.as_secs_f64(),
            outcome.not_started
        )?;
    }
    Ok(())
}

/// Cuts `label` to at most `width` characters.
fn fit(label: &str, width: usize) -> String {
    label.chars().take(width).collect()
}

fn size_or(size: Option<u64>, fallback: &str) -> String {
    size.map_or_else(|| fallback.to_string(), group_thousands)
}

fn bpp_or(bpp: Option<f64>, fallback: &str) -> String {
    bpp.map_or_else(|| fallback.to_string(), |bpp| format!("{bpp:.3}"))
}

fn percent_or(ratio: Option<f64>, fallback: &str) -> String {
    ratio.map_or_else(|| fallback.to_string(), |ratio| format!("{ratio:.2}%"))
}

fn megabytes_per_second(bytes_per_second: Option<f64>) -> String {
    bytes_per_second.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |rate| format!("{:.2} MB/s", rate / 1_000_000.0),
    )
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    use crate::harness::common::error::CodecError;
    use crate::harness::compare::ComparisonResult;
    use crate::harness::metrics::{ReferenceCodec, TrialStatus};

    fn outcome() -> BatchOutcome {
        let ok = TrialRecord {
            input: PathBuf::from("samples/ppm/kodim01.ppm"),
            pixel_count: Some(1000),
            original_size: Some(3_000_015),
            compressed_size: Some(1_500_000),
            reference_sizes: vec![("nut".to_string(), None)],
            status: TrialStatus::Compared(ComparisonResult::Equal),
            encode_duration: Duration::from_millis(500),
            decode_duration: Duration::from_millis(250),
        };
        let failed = TrialRecord::failed(
            PathBuf::from("samples/ppm/broken.ppm"),
            TrialStatus::CodecFailed(CodecError::DecodeFailed { code: Some(3) }),
        );

        let mut report = AggregateReport::new(&[ReferenceCodec::new("nut", "nut", "build")]);
        report.accumulate(&ok);
        report.accumulate(&failed);
        BatchOutcome {
            records: vec![ok, failed],
            report,
            skipped: Vec::new(),
            not_started: 4,
            elapsed: Duration::from_secs(61),
        }
    }

    fn render(outcome: &BatchOutcome) -> String {
        let mut out = Vec::new();
        write_report(&mut out, outcome).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(3_000_015), "3,000,015");
    }

    #[test]
    fn rows_carry_sizes_and_status() {
        let text = render(&outcome());
        let ok_row = text.lines().find(|line| line.contains("kodim01.ppm")).unwrap();
        assert!(ok_row.contains("3,000,015"));
        assert!(ok_row.contains("1,500,000"));
        assert!(ok_row.contains("N/A"));
        assert!(ok_row.contains("50.00%"));
        assert!(ok_row.contains("| OK"));

        let failed_row = text.lines().find(|line| line.contains("broken.ppm")).unwrap();
        assert!(failed_row.contains("ERR (D)"));
        assert!(!failed_row.contains("N/A"));
    }

    #[test]
    fn totals_and_performance() {
        let text = render(&outcome());
        let totals = text.lines().find(|line| line.contains("TOTAL")).unwrap();
        assert!(totals.contains("TOTAL (1 of 2 measured)"));
        assert!(totals.contains("1 FAIL"));
        assert!(text.contains("6.00 MB/s"));
        assert!(text.contains("12.00 MB/s"));
        assert!(text.contains("4 input(s) not started"));
    }

    #[test]
    fn every_line_of_the_table_has_the_same_width() {
        let text = render(&outcome());
        let widths: Vec<usize> = text
            .lines()
            .take_while(|line| !line.is_empty())
            .map(|line| line.chars().count())
            .collect();
        assert!(widths.windows(2).all(|pair| pair[0] == pair[1]), "{widths:?}");
    }

    #[test]
    fn long_reference_names_keep_the_table_aligned() {
        let mut outcome = outcome();
        let name = "jpegxl-lossless-effort9";
        outcome.report = AggregateReport::new(&[ReferenceCodec::new(name, "jxl", "build")]);
        for record in &mut outcome.records {
            outcome.report.accumulate(record);
            if record.status.is_measured() {
                record.reference_sizes = vec![(name.to_string(), Some(1_000_000))];
            }
        }

        let text = render(&outcome);
        let table: Vec<&str> = text.lines().take_while(|line| !line.is_empty()).collect();
        let width = table[0].chars().count();
        assert!(table.iter().all(|line| line.chars().count() == width), "{table:#?}");
        assert!(table[0].contains("jpegxl-lossless"));
    }
}
