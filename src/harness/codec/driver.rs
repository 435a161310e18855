use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{trace, warn};

use crate::harness::common::error::CodecError;

/// The encoder/decoder pair under test.
///
/// Returned durations cover only the codec's own work, not bookkeeping
/// around it.
pub trait Codec {
    fn compressed_path(&self, input: &Path) -> PathBuf;

    /// Where the decoder writes its output for a compressed file.
    fn decoded_path(&self, compressed: &Path) -> PathBuf;

    fn encode(&self, input: &Path, output: &Path) -> Result<Duration, CodecError>;

    /// Decodes `compressed`; on success the output exists at
    /// [`Codec::decoded_path`].
    fn decode(&self, compressed: &Path) -> Result<Duration, CodecError>;

    /// Removes compressed and decoded artifacts left by an earlier run.
    fn clear_artifacts(&self, input: &Path) {
        let compressed = self.compressed_path(input);
        let decoded = self.decoded_path(&compressed);
        for path in [compressed, decoded] {
            match std::fs::remove_file(&path) {
                Ok(()) => trace!(path = %path.display(), "Removed stale artifact"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), error = %e, "Could not remove stale artifact"),
            }
        }
    }
}

/// `photo.ppm` + `.llr` = `photo.ppm.llr`
pub fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
