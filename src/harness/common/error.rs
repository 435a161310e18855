use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to read a P6 raster.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("not a P6 raster")]
    NotP6,

    #[error("invalid P6 header: {0}")]
    InvalidHeader(String),

    #[error("I/O failure: {0}")]
    IoFailure(String),
}

impl From<std::io::Error> for FormatError {
    fn from(err: std::io::Error) -> Self {
        FormatError::IoFailure(err.to_string())
    }
}

/// Which half of the codec pair a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecStage {
    Encode,
    Decode,
}

impl fmt::Display for CodecStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecStage::Encode => f.write_str("encoder"),
            CodecStage::Decode => f.write_str("decoder"),
        }
    }
}

/// Process-level failure of the external encoder or decoder.
///
/// Exit codes are optional because a process terminated by a signal has none.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("encoder exited with {}", describe_code(.code))]
    EncodeFailed { code: Option<i32> },

    #[error("decoder exited with {}", describe_code(.code))]
    DecodeFailed { code: Option<i32> },

    #[error("failed to launch {stage}: {message}")]
    LaunchFailed { stage: CodecStage, message: String },

    #[error("expected output is missing: {}", .0.display())]
    MissingOutput(PathBuf),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, FormatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_become_io_failures() {
        let err: FormatError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err, FormatError::IoFailure("gone".to_string()));
    }

    #[test]
    fn codec_error_messages_name_the_stage() {
        assert_eq!(
            CodecError::EncodeFailed { code: Some(1) }.to_string(),
            "encoder exited with code 1"
        );
        assert_eq!(
            CodecError::DecodeFailed { code: None }.to_string(),
            "decoder exited with no exit code (terminated by signal)"
        );
        let launch = CodecError::LaunchFailed {
            stage: CodecStage::Decode,
            message: "No such file or directory".to_string(),
        };
        assert_eq!(
            launch.to_string(),
            "failed to launch decoder: No such file or directory"
        );
    }
}
