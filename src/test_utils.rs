//! Test utilities for morphox
//!
//! This module provides common fixtures for testing morphological operations.
//! It is only compiled when running tests.

use image::{GrayImage, Luma, Pixel, Rgb, RgbImage};
use imageproc::definitions::Image;

/// Creates a black grayscale image with a single white pixel at `(x, y)`.
pub fn create_single_pixel_image(width: u32, height: u32, x: u32, y: u32) -> GrayImage {
    let mut image = GrayImage::new(width, height);
    image.put_pixel(x, y, Luma([255]));
    image
}

/// Creates a black grayscale image containing a white square ring.
///
/// The ring's outer edge sits `margin` pixels inside the image border and the
/// ring is `thickness` pixels wide; everything inside the ring is black.
pub fn create_ring_image(width: u32, height: u32, margin: u32, thickness: u32) -> GrayImage {
    let inner = margin + thickness;
    GrayImage::from_fn(width, height, |x, y| {
        let in_outer = (margin..width - margin).contains(&x) && (margin..height - margin).contains(&y);
        let in_inner = (inner..width - inner).contains(&x) && (inner..height - inner).contains(&y);
        if in_outer && !in_inner {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Creates a 2x2 RGB image with known pixel values:
/// - (0,0): [200, 150, 100]
/// - (1,0): [100, 200, 150]
/// - (0,1): [150, 100, 200]
/// - (1,1): [50, 75, 25]
pub fn create_test_rgb_image() -> RgbImage {
    let mut image = RgbImage::new(2, 2);
    image.put_pixel(0, 0, Rgb([200, 150, 100]));
    image.put_pixel(1, 0, Rgb([100, 200, 150]));
    image.put_pixel(0, 1, Rgb([150, 100, 200]));
    image.put_pixel(1, 1, Rgb([50, 75, 25]));
    image
}

/// Number of pixels with at least one non-zero channel.
pub fn count_foreground<P>(image: &Image<P>) -> usize
where
    P: Pixel<Subpixel = u8>,
{
    image
        .pixels()
        .filter(|pixel| pixel.channels().iter().any(|&value| value > 0))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_single_pixel_image_sets_one_pixel() {
        let image = create_single_pixel_image(4, 3, 2, 1);
        assert_eq!(image.dimensions(), (4, 3));
        assert_eq!(image.get_pixel(2, 1), &Luma([255]));
        assert_eq!(count_foreground(&image), 1);
    }

    #[test]
    fn create_ring_image_draws_a_closed_ring() {
        let image = create_ring_image(10, 10, 2, 2);
        // Outer square is 6x6, inner hole 2x2
        assert_eq!(count_foreground(&image), 32);
        assert_eq!(image.get_pixel(2, 2), &Luma([255]));
        assert_eq!(image.get_pixel(4, 4), &Luma([0]));
        assert_eq!(image.get_pixel(0, 0), &Luma([0]));
    }

    #[test]
    fn count_foreground_counts_any_channel() {
        let image = create_test_rgb_image();
        assert_eq!(count_foreground(&image), 4);
        assert_eq!(count_foreground(&RgbImage::new(3, 3)), 0);
    }
}
