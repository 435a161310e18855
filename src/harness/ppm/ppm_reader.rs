//! P6 reader that tolerates comments and arbitrary header whitespace.
//!
//! The header is read line by line: a magic line that must be exactly `P6`,
//! then as many lines as it takes to collect width, height and max value.
//! Whole-line comments may appear between any of the three values, and a `#`
//! in the middle of a line ends that line. Everything after the line holding
//! the max value is payload.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::{debug, trace};

use crate::harness::common::error::{FormatError, Result};
use crate::harness::ppm::reader::RasterReader;
use crate::harness::ppm::types::{RasterHeader, RasterImage, P6_CHANNELS};

const MAGIC: &[u8] = b"P6";
const MAX_SAMPLE_VALUE: u64 = 65535;

#[derive(Debug, Default, Clone, Copy)]
pub struct PpmReader;

impl PpmReader {
    fn open(path: &Path) -> Result<BufReader<File>> {
        File::open(path)
            .map(BufReader::new)
            .map_err(|e| FormatError::IoFailure(format!("{}: {}", path.display(), e)))
    }
}

impl RasterReader for PpmReader {
    fn read_header(&self, path: &Path) -> Result<RasterHeader> {
        let mut input = Self::open(path)?;
        let header = parse_header(&mut input)?;
        debug!(
            path = %path.display(),
            width = header.width,
            height = header.height,
            max_value = header.max_value,
            "Read P6 header"
        );
        Ok(header)
    }

    fn read_raster(&self, path: &Path) -> Result<RasterImage> {
        let mut input = Self::open(path)?;
        let header = parse_header(&mut input)?;

        // The header alone is untrusted; never reserve more than the file holds.
        let file_len = input
            .get_ref()
            .metadata()
            .map_or(0, |meta| usize::try_from(meta.len()).unwrap_or(usize::MAX));
        let mut payload = Vec::with_capacity(header.expected_payload_len().min(file_len));
        input
            .read_to_end(&mut payload)
            .map_err(|e| FormatError::IoFailure(format!("{}: {}", path.display(), e)))?;

        let image = RasterImage { header, payload };
        if !image.payload_is_complete() {
            debug!(
                path = %path.display(),
                expected = header.expected_payload_len(),
                actual = image.payload.len(),
                "Payload length does not match header"
            );
        }
        Ok(image)
    }
}

/// Parses a P6 header, leaving `input` positioned at the first payload byte.
pub fn parse_header<R: BufRead>(input: &mut R) -> Result<RasterHeader> {
    let mut line = Vec::new();
    input.read_until(b'\n', &mut line)?;
    if line.trim_ascii() != MAGIC {
        return Err(FormatError::NotP6);
    }

    let mut values: Vec<u64> = Vec::with_capacity(3);
    while values.len() < 3 {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            return Err(FormatError::InvalidHeader(format!(
                "expected width, height and max value, found {} value(s)",
                values.len()
            )));
        }

        let text = std::str::from_utf8(&line)
            .map_err(|_| FormatError::InvalidHeader("header line is not text".to_string()))?;
        let text = text.trim_start();
        if text.starts_with('#') {
            trace!("Skipping header comment");
            continue;
        }
        let text = text.split_once('#').map_or(text, |(before, _)| before);

        for token in text.split_ascii_whitespace() {
            if values.len() == 3 {
                return Err(FormatError::InvalidHeader(format!(
                    "unexpected {token:?} after max value"
                )));
            }
            let value = token.parse::<u64>().map_err(|_| {
                FormatError::InvalidHeader(format!("{token:?} is not a non-negative integer"))
            })?;
            values.push(value);
        }
    }

    build_header(values[0], values[1], values[2])
}

fn build_header(width: u64, height: u64, max_value: u64) -> Result<RasterHeader> {
    if width == 0 || height == 0 {
        return Err(FormatError::InvalidHeader(format!(
            "empty raster {width}x{height}"
        )));
    }
    if max_value == 0 || max_value > MAX_SAMPLE_VALUE {
        return Err(FormatError::InvalidHeader(format!(
            "max value {max_value} outside 1..={MAX_SAMPLE_VALUE}"
        )));
    }

    let overflow = || FormatError::InvalidHeader(format!("raster {width}x{height} is too large"));
    let width = usize::try_from(width).map_err(|_| overflow())?;
    let height = usize::try_from(height).map_err(|_| overflow())?;
    width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(P6_CHANNELS * 2))
        .ok_or_else(overflow)?;

    Ok(RasterHeader {
        width,
        height,
        max_value: max_value as u32,
    })
}
