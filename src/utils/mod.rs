//! Internal utility functions for morphox.
//!
//! This module contains common functionality used across different image operations.

use crate::error::MorphologyError;

/// Validates that an image has non-zero dimensions.
///
/// # Arguments
///
/// * `width` - The width of the image
/// * `height` - The height of the image
///
/// # Returns
///
/// `Ok(())` if the dimensions are valid, otherwise `MorphologyError::EmptyImage`
pub fn validate_non_empty_image(width: u32, height: u32) -> Result<(), MorphologyError> {
    if width == 0 || height == 0 {
        Err(MorphologyError::EmptyImage)
    } else {
        Ok(())
    }
}

/// Inclusive window `[center - radius, center + radius]` clamped to `0..len`.
///
/// The third element reports whether the unclamped window reached past
/// either end of the line.
#[inline]
pub fn clamp_window(center: usize, radius: usize, len: usize) -> (usize, usize, bool) {
    let low = center.saturating_sub(radius);
    let high = (center + radius).min(len - 1);
    let clipped = center < radius || center + radius >= len;
    (low, high, clipped)
}

/// Runs `f` over every row of `buffer`, passing the row index.
///
/// Rows are processed in parallel when the `rayon` feature is enabled.
/// `row_len` must be non-zero.
pub fn for_each_row<F>(buffer: &mut [u8], row_len: usize, f: F)
where
    F: Fn(usize, &mut [u8]) + Send + Sync,
{
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        buffer
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    }

    #[cfg(not(feature = "rayon"))]
    buffer
        .chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}
