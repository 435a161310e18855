//! PPM reading module
//!
//! This module provides comment-insensitive reading of binary P6 rasters.

mod reader;
mod ppm_reader;
pub mod types;

pub use reader::RasterReader;
pub use ppm_reader::PpmReader;
pub use types::{RasterHeader, RasterImage};
