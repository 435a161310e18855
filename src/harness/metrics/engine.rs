use std::path::Path;

/// `compressed / original * 100`, or `None` for an empty original.
pub fn ratio_percent(compressed_bytes: u64, original_bytes: u64) -> Option<f64> {
    (original_bytes > 0).then(|| compressed_bytes as f64 / original_bytes as f64 * 100.0)
}

/// `bytes * 8 / pixels`, or `None` when there are no pixels to spread them over.
pub fn bits_per_pixel(bytes: u64, pixel_count: u64) -> Option<f64> {
    (pixel_count > 0).then(|| bytes as f64 * 8.0 / pixel_count as f64)
}

/// Size of a regular file, `None` if it is absent or not a file.
pub fn file_size(path: &Path) -> Option<u64> {
    std::fs::metadata(path)
        .ok()
        .filter(|meta| meta.is_file())
        .map(|meta| meta.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_of_half() {
        assert_eq!(ratio_percent(50, 100), Some(50.0));
        assert_eq!(ratio_percent(1, 0), None);
    }

    #[test]
    fn bpp_needs_pixels() {
        assert_eq!(bits_per_pixel(6, 2), Some(24.0));
        assert_eq!(bits_per_pixel(6, 0), None);
    }

    #[test]
    fn metrics_grow_with_compressed_size() {
        let mut last_ratio = 0.0;
        let mut last_bpp = 0.0;
        for compressed in [0u64, 1, 7, 100, 4096, 1 << 20] {
            let ratio = ratio_percent(compressed, 10_000).unwrap();
            let bpp = bits_per_pixel(compressed, 3_000).unwrap();
            assert!(ratio >= last_ratio);
            assert!(bpp >= last_bpp);
            last_ratio = ratio;
            last_bpp = bpp;
        }
    }

    #[test]
    fn directories_have_no_file_size() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(file_size(dir.path()), None);
        assert_eq!(file_size(&dir.path().join("absent")), None);

        let path = dir.path().join("five");
        std::fs::write(&path, b"12345").unwrap();
        assert_eq!(file_size(&path), Some(5));
    }
}
