//! Common utilities module
//!
//! This module contains the error taxonomy shared across the harness.

pub mod error;

pub use error::{CodecError, CodecStage, FormatError, Result};
