//! Codec implementation that runs external executables.
//!
//! The encoder is called with the input raster and the compressed output
//! path; the decoder gets only the compressed path and names its own output
//! by appending the decoded suffix.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use tracing::{debug, warn};

use crate::harness::codec::driver::{append_suffix, Codec};
use crate::harness::codec::types::CodecConfig;
use crate::harness::common::error::{CodecError, CodecStage};
use crate::harness::timing::Timer;

pub struct ProcessCodec {
    config: CodecConfig,
}

impl ProcessCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    fn run(&self, stage: CodecStage, program: &Path, args: &[&OsStr]) -> Result<Duration, CodecError> {
        debug!(%stage, program = %program.display(), ?args, "Launching codec");

        let timer = Timer::start(match stage {
            CodecStage::Encode => "encode",
            CodecStage::Decode => "decode",
        });
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output();
        let (name, elapsed) = timer.stop();

        let output = output.map_err(|e| CodecError::LaunchFailed {
            stage,
            message: format!("{}: {}", program.display(), e),
        })?;

        if !output.status.success() {
            let code = output.status.code();
            warn!(
                %stage,
                ?code,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "Codec process failed"
            );
            return Err(match stage {
                CodecStage::Encode => CodecError::EncodeFailed { code },
                CodecStage::Decode => CodecError::DecodeFailed { code },
            });
        }

        debug!("{}: {:.3}ms", name, elapsed.as_secs_f64() * 1000.0);
        Ok(elapsed)
    }
}

impl Codec for ProcessCodec {
    fn compressed_path(&self, input: &Path) -> PathBuf {
        append_suffix(input, &self.config.compressed_suffix)
    }

    fn decoded_path(&self, compressed: &Path) -> PathBuf {
        append_suffix(compressed, &self.config.decoded_suffix)
    }

    fn encode(&self, input: &Path, output: &Path) -> Result<Duration, CodecError> {
        let elapsed = self.run(
            CodecStage::Encode,
            &self.config.encoder,
            &[input.as_os_str(), output.as_os_str()],
        )?;
        if !output.exists() {
            return Err(CodecError::MissingOutput(output.to_path_buf()));
        }
        Ok(elapsed)
    }

    fn decode(&self, compressed: &Path) -> Result<Duration, CodecError> {
        let elapsed = self.run(
            CodecStage::Decode,
            &self.config.decoder,
            &[compressed.as_os_str()],
        )?;
        let decoded = self.decoded_path(compressed);
        if !decoded.exists() {
            return Err(CodecError::MissingOutput(decoded));
        }
        Ok(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_executable_is_launch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let codec = ProcessCodec::new(
            CodecConfig::builder()
                .encoder(dir.path().join("no-such-encoder"))
                .build(),
        );
        let input = dir.path().join("a.ppm");
        let err = codec.encode(&input, &codec.compressed_path(&input)).unwrap_err();
        assert!(matches!(
            err,
            CodecError::LaunchFailed { stage: CodecStage::Encode, .. }
        ));
    }

    #[test]
    fn paths_follow_configured_suffixes() {
        let codec = ProcessCodec::new(
            CodecConfig::builder()
                .compressed_suffix(".xz")
                .decoded_suffix(".out")
                .build(),
        );
        let compressed = codec.compressed_path(Path::new("in/a.ppm"));
        assert_eq!(compressed, PathBuf::from("in/a.ppm.xz"));
        assert_eq!(codec.decoded_path(&compressed), PathBuf::from("in/a.ppm.xz.out"));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_classified_per_stage() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.ppm");
        std::fs::write(&input, b"P6\n1 1\n255\n\x00\x00\x00").unwrap();

        let codec = ProcessCodec::new(
            CodecConfig::builder().encoder("false").decoder("false").build(),
        );
        let compressed = codec.compressed_path(&input);
        assert_eq!(
            codec.encode(&input, &compressed).unwrap_err(),
            CodecError::EncodeFailed { code: Some(1) }
        );
        assert_eq!(
            codec.decode(&compressed).unwrap_err(),
            CodecError::DecodeFailed { code: Some(1) }
        );
    }

    #[cfg(unix)]
    #[test]
    fn successful_process_without_output_is_missing_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.ppm");
        std::fs::write(&input, b"P6\n1 1\n255\n\x00\x00\x00").unwrap();

        let codec = ProcessCodec::new(
            CodecConfig::builder().encoder("true").decoder("true").build(),
        );
        let compressed = codec.compressed_path(&input);
        assert_eq!(
            codec.encode(&input, &compressed).unwrap_err(),
            CodecError::MissingOutput(compressed.clone())
        );
        assert_eq!(
            codec.decode(&compressed).unwrap_err(),
            CodecError::MissingOutput(codec.decoded_path(&compressed))
        );
    }

    #[test]
    fn clear_artifacts_removes_both_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.ppm");
        let codec = ProcessCodec::new(CodecConfig::default());
        let compressed = codec.compressed_path(&input);
        let decoded = codec.decoded_path(&compressed);
        std::fs::write(&compressed, b"stale").unwrap();
        std::fs::write(&decoded, b"stale").unwrap();

        codec.clear_artifacts(&input);
        assert!(!compressed.exists());
        assert!(!decoded.exists());

        // Nothing left to remove is fine too.
        codec.clear_artifacts(&input);
    }
}
