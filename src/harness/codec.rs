//! External codec driving module
//!
//! This module launches the encoder and decoder under test as subprocesses
//! and classifies how they fail.

mod driver;
mod process_codec;
pub mod types;

pub use driver::{append_suffix, Codec};
pub use process_codec::ProcessCodec;
pub use types::{CodecConfig, CodecConfigBuilder};
