//! Pre-generated artifacts of competing codecs, used only for size comparison.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::harness::metrics::engine::file_size;

/// A competing codec whose output for `X.ext` lives at `<directory>/X.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceCodec {
    pub name: String,
    pub extension: String,
    pub directory: PathBuf,
}

impl ReferenceCodec {
    pub fn new(name: impl Into<String>, extension: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            extension: extension.into(),
            directory: directory.into(),
        }
    }

    pub fn artifact_path(&self, input: &Path) -> Option<PathBuf> {
        let mut name = input.file_stem()?.to_os_string();
        name.push(".");
        name.push(&self.extension);
        Some(self.directory.join(name))
    }

    /// Size of this codec's artifact for `input`, `None` when it was never generated.
    pub fn artifact_size(&self, input: &Path) -> Option<u64> {
        self.artifact_path(input).as_deref().and_then(file_size)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid reference codec {0:?}: expected NAME=EXT or NAME=EXT@DIR")]
pub struct ReferenceParseError(String);

impl FromStr for ReferenceCodec {
    type Err = ReferenceParseError;

    /// `nut=nut@build`; the directory defaults to the current one.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ReferenceParseError(value.to_string());
        let (name, rest) = value.split_once('=').ok_or_else(invalid)?;
        let (extension, directory) = rest.split_once('@').unwrap_or((rest, "."));
        let extension = extension.trim_start_matches('.');

        if name.is_empty() || extension.is_empty() || directory.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(name, extension, directory))
    }
}
