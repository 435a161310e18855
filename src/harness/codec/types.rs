//! Codec invocation configuration types

use std::path::PathBuf;

/// How to invoke the codec pair and how it names its outputs
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Encoder executable, called as `encoder <input> <output>`
    pub encoder: PathBuf,
    /// Decoder executable, called as `decoder <compressed>`
    pub decoder: PathBuf,
    /// Appended to an input path to name its compressed artifact
    pub compressed_suffix: String,
    /// Appended by the decoder to the compressed path to name its output
    pub decoded_suffix: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            encoder: PathBuf::from("build/llrice-c"),
            decoder: PathBuf::from("build/llrice-d"),
            compressed_suffix: ".llr".to_string(),
            decoded_suffix: ".ppm".to_string(),
        }
    }
}

impl CodecConfig {
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::default()
    }
}

/// Builder for CodecConfig
#[derive(Default)]
pub struct CodecConfigBuilder {
    encoder: Option<PathBuf>,
    decoder: Option<PathBuf>,
    compressed_suffix: Option<String>,
    decoded_suffix: Option<String>,
}

impl CodecConfigBuilder {
    pub fn encoder(mut self, encoder: impl Into<PathBuf>) -> Self {
        self.encoder = Some(encoder.into());
        self
    }

    pub fn decoder(mut self, decoder: impl Into<PathBuf>) -> Self {
        self.decoder = Some(decoder.into());
        self
    }

    pub fn compressed_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.compressed_suffix = Some(suffix.into());
        self
    }

    pub fn decoded_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.decoded_suffix = Some(suffix.into());
        self
    }

    pub fn build(self) -> CodecConfig {
        let default = CodecConfig::default();
        CodecConfig {
            encoder: self.encoder.unwrap_or(default.encoder),
            decoder: self.decoder.unwrap_or(default.decoder),
            compressed_suffix: self.compressed_suffix.unwrap_or(default.compressed_suffix),
            decoded_suffix: self.decoded_suffix.unwrap_or(default.decoded_suffix),
        }
    }
}
