//! P6 raster data types

/// Channels per pixel in a P6 raster.
pub const P6_CHANNELS: usize = 3;

/// Header fields of a P6 raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterHeader {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Largest sample value, at most 65535
    pub max_value: u32,
}

impl RasterHeader {
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// One byte per sample up to a max value of 255, two (big-endian) above.
    pub fn bytes_per_sample(&self) -> usize {
        if self.max_value <= 255 { 1 } else { 2 }
    }

    pub fn expected_payload_len(&self) -> usize {
        self.width * self.height * P6_CHANNELS * self.bytes_per_sample()
    }
}

/// A decoded P6 raster: header plus the raw sample bytes that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub header: RasterHeader,
    /// Bytes after the header, uninterpreted
    pub payload: Vec<u8>,
}

impl RasterImage {
    pub fn payload_is_complete(&self) -> bool {
        self.payload.len() == self.header.expected_payload_len()
    }
}
