use std::collections::HashSet;

use image::{imageops, GrayImage, Luma, Pixel, Rgb};
use imageproc::contrast::otsu_level;
use imageproc::definitions::Image;
use imageproc::filter::separable_filter_equal;
use imageproc::map::{map_colors, map_colors2};
use imageproc::region_labelling::{connected_components, Connectivity};
use itertools::{iproduct, Itertools, MinMaxResult};
use log::debug;

use crate::error::MorphologyError;
use crate::utils::validate_non_empty_image;

const FOREGROUND: u8 = u8::MAX;
const BACKGROUND: u8 = 0;

/// 5-tap binomial kernel, the separable form of a 5x5 Gaussian whose sigma
/// is derived from the kernel size.
const GAUSSIAN_KERNEL_5: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// Threshold used when the histogram has a single intensity.
const FALLBACK_LEVEL: u8 = 127;

/// Where the background flood fill starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillSeed {
    /// Only the top-left pixel
    #[default]
    TopLeft,
    /// Every background pixel on the image border
    Border,
}

/// Options for the hole filling stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillOptions {
    /// Neighbourhood used by the flood fill
    pub connectivity: Connectivity,
    /// Seed pixels of the flood fill
    pub seed: FillSeed,
}

impl FillOptions {
    pub const fn new(connectivity: Connectivity, seed: FillSeed) -> Self {
        Self { connectivity, seed }
    }
}

impl Default for FillOptions {
    fn default() -> Self {
        Self::new(Connectivity::Four, FillSeed::TopLeft)
    }
}

/// Binary mask produced by automatic thresholding.
#[derive(Debug, Clone, PartialEq)]
pub struct Binarization {
    /// `255` where the sample is above `level`, `0` elsewhere
    pub mask: GrayImage,
    /// Last intensity assigned to the background class
    pub level: u8,
}

/// Region filling: binarize an image and fill the holes inside its objects.
///
/// The pipeline is:
///
/// 1. Reduce to luminance.
/// 2. Smooth with a 5x5 Gaussian.
/// 3. Binarize with Otsu's threshold.
/// 4. If the top-left pixel is foreground, invert the mask so the background
///    is black. The corner is assumed to never belong to an object.
/// 5. Flood fill the background from the seed pixels.
/// 6. Every background pixel the fill did not reach is a hole; holes are
///    merged into the mask.
/// 7. Broadcast the mask to three identical channels.
///
/// # Examples
///
/// ```rust
/// use image::{Luma, RgbImage, Rgb};
/// use morphox::RegionFillExt;
///
/// // White ring with a black hole on a black background
/// let image = RgbImage::from_fn(20, 20, |x, y| {
///     let ring = (4..16).contains(&x) && (4..16).contains(&y);
///     let hole = (7..13).contains(&x) && (7..13).contains(&y);
///     if ring && !hole { Rgb([255, 255, 255]) } else { Rgb([0, 0, 0]) }
/// });
///
/// let filled = image.fill_regions().unwrap();
/// assert_eq!(filled.get_pixel(10, 10), &Rgb([255, 255, 255]));
/// assert_eq!(filled.get_pixel(0, 0), &Rgb([0, 0, 0]));
/// ```
pub trait RegionFillExt {
    /// Fill regions with the default options (4-connected fill seeded at the
    /// top-left pixel).
    ///
    /// # Errors
    ///
    /// * `MorphologyError::EmptyImage` - If the image has no pixels
    fn fill_regions(&self) -> Result<Image<Rgb<u8>>, MorphologyError> {
        self.fill_regions_with(&FillOptions::default())
    }

    /// Fill regions with explicit flood fill options.
    fn fill_regions_with(&self, options: &FillOptions) -> Result<Image<Rgb<u8>>, MorphologyError>;
}

impl<P> RegionFillExt for Image<P>
where
    P: Pixel<Subpixel = u8>,
{
    fn fill_regions_with(&self, options: &FillOptions) -> Result<Image<Rgb<u8>>, MorphologyError> {
        let (width, height) = self.dimensions();
        validate_non_empty_image(width, height)?;

        let gray = imageops::grayscale(self);
        let blurred = separable_filter_equal(&gray, &GAUSSIAN_KERNEL_5);

        let Binarization { mut mask, level } = binarize_otsu(&blurred);
        let inverted = normalize_polarity(&mut mask);
        debug!(
            "region fill on {}x{}: otsu level {}, background inverted: {}",
            width, height, level, inverted
        );

        let filled = fill_holes(&mask, options);
        Ok(map_colors(&filled, |Luma([value])| Rgb([value, value, value])))
    }
}

/// Binarize a grayscale image with Otsu's threshold.
///
/// Samples above the level become `255`, the rest `0`. An image with a single
/// intensity has no between-class variance; it falls back to the midpoint, so
/// samples of 128 and above become foreground.
pub fn binarize_otsu(image: &GrayImage) -> Binarization {
    let level = match image.iter().minmax() {
        MinMaxResult::MinMax(min, max) if min != max => otsu_level(image),
        _ => FALLBACK_LEVEL,
    };
    let mask = map_colors(image, |Luma([value])| {
        Luma([if value > level { FOREGROUND } else { BACKGROUND }])
    });
    Binarization { mask, level }
}

/// Make the background black.
///
/// Inverts the mask when its top-left pixel is foreground and reports whether
/// it did.
pub fn normalize_polarity(mask: &mut GrayImage) -> bool {
    let corner_is_foreground = matches!(mask.get_pixel_checked(0, 0), Some(Luma([FOREGROUND])));
    if corner_is_foreground {
        imageops::invert(mask);
    }
    corner_is_foreground
}

/// Fill the holes of a binary mask whose background is black.
///
/// The background reachable from the seed pixels is flood filled on a copy,
/// the copy is inverted so only unreached background (the holes) stays
/// white, and the result is OR-ed with the original mask.
pub fn fill_holes(mask: &GrayImage, options: &FillOptions) -> GrayImage {
    let mut flooded = mask.clone();
    flood_fill_background(&mut flooded, options);
    imageops::invert(&mut flooded);
    map_colors2(mask, &flooded, |Luma([a]), Luma([b])| Luma([a | b]))
}

/// Paint every background pixel connected to a seed with the foreground
/// value.
///
/// Background pixels are labelled with `connected_components` (foreground is
/// the labelling background, so it gets label 0); the components that own a
/// background seed are the reached ones.
fn flood_fill_background(image: &mut GrayImage, options: &FillOptions) {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let labels = connected_components(&*image, options.connectivity, Luma([FOREGROUND]));
    let reached: HashSet<u32> = seed_pixels(width, height, options.seed)
        .into_iter()
        .filter(|&(x, y)| image.get_pixel(x, y)[0] == BACKGROUND)
        .map(|(x, y)| labels.get_pixel(x, y)[0])
        .collect();

    for (pixel, label) in image.pixels_mut().zip(labels.pixels()) {
        if reached.contains(&label[0]) {
            *pixel = Luma([FOREGROUND]);
        }
    }
}

fn seed_pixels(width: u32, height: u32, seed: FillSeed) -> Vec<(u32, u32)> {
    match seed {
        FillSeed::TopLeft => vec![(0, 0)],
        FillSeed::Border => iproduct!(0..height, 0..width)
            .filter(|&(y, x)| x == 0 || y == 0 || x == width - 1 || y == height - 1)
            .map(|(y, x)| (x, y))
            .collect(),
    }
}
