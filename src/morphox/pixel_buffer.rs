use image::{DynamicImage, GrayImage, RgbImage};

use crate::error::CodecError;

/// 8-bit image with one or three channels.
///
/// This is the unit of work handed to [`apply`](crate::apply): decoded input
/// goes in, a buffer of the same spatial dimensions comes out.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelBuffer {
    /// Single-channel luminance
    Gray(GrayImage),
    /// Three-channel color
    Rgb(RgbImage),
}

impl PixelBuffer {
    /// Convert a decoded image into a pixel buffer.
    ///
    /// Color images become [`PixelBuffer::Rgb`] with any alpha channel dropped,
    /// gray images become [`PixelBuffer::Gray`]. Deeper sample types are
    /// scaled down to 8 bits.
    ///
    /// # Errors
    ///
    /// * `CodecError::EmptyImage` - If the image has a zero width or height
    pub fn from_dynamic(image: DynamicImage) -> Result<Self, CodecError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(CodecError::EmptyImage);
        }

        Ok(match image {
            DynamicImage::ImageLuma8(gray) => Self::Gray(gray),
            DynamicImage::ImageRgb8(rgb) => Self::Rgb(rgb),
            other if other.color().has_color() => Self::Rgb(other.to_rgb8()),
            other => Self::Gray(other.to_luma8()),
        })
    }

    /// `(width, height)` in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Gray(image) => image.dimensions(),
            Self::Rgb(image) => image.dimensions(),
        }
    }

    pub fn width(&self) -> u32 {
        self.dimensions().0
    }

    pub fn height(&self) -> u32 {
        self.dimensions().1
    }

    /// Number of samples per pixel (1 or 3)
    pub const fn channel_count(&self) -> u8 {
        match self {
            Self::Gray(_) => 1,
            Self::Rgb(_) => 3,
        }
    }

    /// Borrowing counterpart of [`into_dynamic`](Self::into_dynamic); copies
    /// the pixels.
    pub fn as_dynamic(&self) -> DynamicImage {
        self.clone().into_dynamic()
    }

    pub fn into_dynamic(self) -> DynamicImage {
        match self {
            Self::Gray(image) => DynamicImage::ImageLuma8(image),
            Self::Rgb(image) => DynamicImage::ImageRgb8(image),
        }
    }
}

impl From<GrayImage> for PixelBuffer {
    fn from(image: GrayImage) -> Self {
        Self::Gray(image)
    }
}

impl From<RgbImage> for PixelBuffer {
    fn from(image: RgbImage) -> Self {
        Self::Rgb(image)
    }
}
