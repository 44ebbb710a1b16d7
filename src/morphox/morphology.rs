use image::{ImageBuffer, Pixel};
use imageproc::definitions::Image;

use crate::error::MorphologyError;
use crate::morphox::pixel_buffer::PixelBuffer;
use crate::morphox::structuring_element::StructuringElement;
use crate::utils::{clamp_window, for_each_row, validate_non_empty_image};

/// Flat morphological operators over 8-bit images.
///
/// Every channel is processed independently: dilation takes the per-channel
/// maximum over the structuring element window, erosion the per-channel
/// minimum.
///
/// # Border handling
///
/// * Dilation ignores samples outside the image.
/// * Erosion treats samples outside the image as `0`, so a window that
///   reaches past the border erodes the border region.
///
/// # Examples
///
/// ```rust
/// use image::{GrayImage, Luma};
/// use morphox::{MorphologyExt, StructuringElement};
///
/// let mut image = GrayImage::new(11, 11);
/// image.put_pixel(5, 5, Luma([255]));
///
/// let element = StructuringElement::square(3).unwrap();
/// let dilated = image.dilate(&element, 1).unwrap();
///
/// assert_eq!(dilated.get_pixel(4, 4), &Luma([255]));
/// assert_eq!(dilated.get_pixel(6, 6), &Luma([255]));
/// assert_eq!(dilated.get_pixel(3, 5), &Luma([0]));
/// ```
pub trait MorphologyExt {
    /// Dilate `iterations` times, each pass consuming the previous result.
    ///
    /// # Errors
    ///
    /// * `MorphologyError::InvalidIterations` - If `iterations` is zero
    /// * `MorphologyError::EmptyImage` - If the image has no pixels
    fn dilate(
        &self,
        element: &StructuringElement,
        iterations: u32,
    ) -> Result<Self, MorphologyError>
    where
        Self: Sized;

    /// Erode `iterations` times, each pass consuming the previous result.
    ///
    /// # Errors
    ///
    /// * `MorphologyError::InvalidIterations` - If `iterations` is zero
    /// * `MorphologyError::EmptyImage` - If the image has no pixels
    fn erode(&self, element: &StructuringElement, iterations: u32) -> Result<Self, MorphologyError>
    where
        Self: Sized;

    /// One erosion followed by one dilation.
    fn open(&self, element: &StructuringElement) -> Result<Self, MorphologyError>
    where
        Self: Sized;

    /// One dilation followed by one erosion.
    fn close(&self, element: &StructuringElement) -> Result<Self, MorphologyError>
    where
        Self: Sized;
}

impl<P> MorphologyExt for Image<P>
where
    P: Pixel<Subpixel = u8>,
{
    fn dilate(&self, element: &StructuringElement, iterations: u32) -> Result<Self, MorphologyError> {
        validate_input(self, iterations)?;
        Ok(repeat_pass(self, element, iterations, Extremum::Maximum))
    }

    fn erode(&self, element: &StructuringElement, iterations: u32) -> Result<Self, MorphologyError> {
        validate_input(self, iterations)?;
        Ok(repeat_pass(self, element, iterations, Extremum::Minimum))
    }

    fn open(&self, element: &StructuringElement) -> Result<Self, MorphologyError> {
        validate_input(self, 1)?;
        let eroded = morph_pass(self, element, Extremum::Minimum);
        Ok(morph_pass(&eroded, element, Extremum::Maximum))
    }

    fn close(&self, element: &StructuringElement) -> Result<Self, MorphologyError> {
        validate_input(self, 1)?;
        let dilated = morph_pass(self, element, Extremum::Maximum);
        Ok(morph_pass(&dilated, element, Extremum::Minimum))
    }
}

/// Runs on whichever image the buffer holds; the channel count is kept.
impl MorphologyExt for PixelBuffer {
    fn dilate(&self, element: &StructuringElement, iterations: u32) -> Result<Self, MorphologyError> {
        Ok(match self {
            Self::Gray(image) => Self::Gray(image.dilate(element, iterations)?),
            Self::Rgb(image) => Self::Rgb(image.dilate(element, iterations)?),
        })
    }

    fn erode(&self, element: &StructuringElement, iterations: u32) -> Result<Self, MorphologyError> {
        Ok(match self {
            Self::Gray(image) => Self::Gray(image.erode(element, iterations)?),
            Self::Rgb(image) => Self::Rgb(image.erode(element, iterations)?),
        })
    }

    fn open(&self, element: &StructuringElement) -> Result<Self, MorphologyError> {
        Ok(match self {
            Self::Gray(image) => Self::Gray(image.open(element)?),
            Self::Rgb(image) => Self::Rgb(image.open(element)?),
        })
    }

    fn close(&self, element: &StructuringElement) -> Result<Self, MorphologyError> {
        Ok(match self {
            Self::Gray(image) => Self::Gray(image.close(element)?),
            Self::Rgb(image) => Self::Rgb(image.close(element)?),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extremum {
    Maximum,
    Minimum,
}

impl Extremum {
    /// Neutral element of the fold
    const fn identity(self) -> u8 {
        match self {
            Self::Maximum => u8::MIN,
            Self::Minimum => u8::MAX,
        }
    }

    /// Value contributed by a sample outside the image, if any
    const fn out_of_bounds(self) -> Option<u8> {
        match self {
            Self::Maximum => None,
            Self::Minimum => Some(0),
        }
    }

    #[inline]
    fn combine(self, a: u8, b: u8) -> u8 {
        match self {
            Self::Maximum => a.max(b),
            Self::Minimum => a.min(b),
        }
    }
}

fn validate_input<P>(image: &Image<P>, iterations: u32) -> Result<(), MorphologyError>
where
    P: Pixel<Subpixel = u8>,
{
    if iterations == 0 {
        return Err(MorphologyError::InvalidIterations { iterations });
    }
    let (width, height) = image.dimensions();
    validate_non_empty_image(width, height)
}

fn repeat_pass<P>(
    image: &Image<P>,
    element: &StructuringElement,
    iterations: u32,
    extremum: Extremum,
) -> Image<P>
where
    P: Pixel<Subpixel = u8>,
{
    let mut current = morph_pass(image, element, extremum);
    for _ in 1..iterations {
        current = morph_pass(&current, element, extremum);
    }
    current
}

fn morph_pass<P>(image: &Image<P>, element: &StructuringElement, extremum: Extremum) -> Image<P>
where
    P: Pixel<Subpixel = u8>,
{
    if element.is_rectangular() {
        let radius = element.radius() as usize;
        let rows = line_pass(image, radius, Direction::Horizontal, extremum);
        line_pass(&rows, radius, Direction::Vertical, extremum)
    } else {
        offset_pass(image, element.offsets(), extremum)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Horizontal,
    Vertical,
}

/// One-dimensional extremum filter along rows or columns.
///
/// A rectangular element is the product of a row segment and a column
/// segment, and clipping in either pass zeroes an erosion exactly as a
/// clipped 2-D window would.
fn line_pass<P>(image: &Image<P>, radius: usize, direction: Direction, extremum: Extremum) -> Image<P>
where
    P: Pixel<Subpixel = u8>,
{
    let (width, height) = image.dimensions();
    let (width, height) = (width as usize, height as usize);
    let channels = P::CHANNEL_COUNT as usize;
    let row_len = width * channels;
    let source = image.as_raw();

    let mut output: Image<P> = ImageBuffer::new(width as u32, height as u32);
    for_each_row(&mut output, row_len, |y, row| {
        for x in 0..width {
            let (low, high, clipped) = match direction {
                Direction::Horizontal => clamp_window(x, radius, width),
                Direction::Vertical => clamp_window(y, radius, height),
            };
            for c in 0..channels {
                row[x * channels + c] = match (clipped, extremum.out_of_bounds()) {
                    (true, Some(border)) => border,
                    _ => (low..=high)
                        .map(|i| match direction {
                            Direction::Horizontal => source[(y * width + i) * channels + c],
                            Direction::Vertical => source[(i * width + x) * channels + c],
                        })
                        .fold(extremum.identity(), |acc, value| extremum.combine(acc, value)),
                };
            }
        }
    });
    output
}

/// Direct scan over the hit offsets of an arbitrary element.
fn offset_pass<P>(image: &Image<P>, offsets: &[(i32, i32)], extremum: Extremum) -> Image<P>
where
    P: Pixel<Subpixel = u8>,
{
    let (width, height) = image.dimensions();
    let (width, height) = (width as i64, height as i64);
    let channels = P::CHANNEL_COUNT as usize;
    let row_len = width as usize * channels;
    let source = image.as_raw();

    let mut output: Image<P> = ImageBuffer::new(width as u32, height as u32);
    for_each_row(&mut output, row_len, |y, row| {
        for x in 0..width as usize {
            for c in 0..channels {
                row[x * channels + c] =
                    offsets
                        .iter()
                        .fold(extremum.identity(), |acc, &(dx, dy)| {
                            let sx = x as i64 + i64::from(dx);
                            let sy = y as i64 + i64::from(dy);
                            if sx < 0 || sy < 0 || sx >= width || sy >= height {
                                extremum
                                    .out_of_bounds()
                                    .map_or(acc, |border| extremum.combine(acc, border))
                            } else {
                                let index = (sy * width + sx) as usize * channels + c;
                                extremum.combine(acc, source[index])
                            }
                        });
            }
        }
    });
    output
}
