use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::error::MorphologyError;
use crate::morphox::morphology::MorphologyExt;
use crate::morphox::pixel_buffer::PixelBuffer;
use crate::morphox::region_fill::RegionFillExt;
use crate::morphox::structuring_element::{validate_kernel_size, Shape, StructuringElement};
use crate::utils::validate_non_empty_image;

/// The closed set of operations a request can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Operation {
    /// Pass the input through unchanged
    Identity,
    Dilate,
    Erode,
    /// Erosion followed by dilation
    Open,
    /// Dilation followed by erosion
    Close,
    /// Otsu binarization with hole filling
    FillRegions,
}

impl Operation {
    /// All operations in presentation order
    pub const ALL: [Self; 6] = [
        Self::Identity,
        Self::Dilate,
        Self::Erode,
        Self::Open,
        Self::Close,
        Self::FillRegions,
    ];

    /// Label shown to users when selecting the operation
    pub const fn label(self) -> &'static str {
        match self {
            Self::Identity => "Original",
            Self::Dilate => "Dilasi",
            Self::Erode => "Erosi",
            Self::Open => "Opening",
            Self::Close => "Closing",
            Self::FillRegions => "Region Filling",
        }
    }

    /// Whether the operation probes the image with a structuring element.
    ///
    /// Only these operations read `kernel_size`, `iterations` and `shape`.
    pub const fn uses_structuring_element(self) -> bool {
        matches!(self, Self::Dilate | Self::Erode | Self::Open | Self::Close)
    }

    /// File name offered when exporting a result as PNG
    pub fn export_file_name(self) -> String {
        format!("MorphoX_{}.png", self.label())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Operation {
    type Err = MorphologyError;

    /// Parse a presentation label (`"Dilasi"`, `"Region Filling"`, ...) or an
    /// English alias (`"dilate"`, `"fill-regions"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(operation) = Self::ALL.into_iter().find(|op| op.label() == s) {
            return Ok(operation);
        }

        match s.trim().to_ascii_lowercase().as_str() {
            "identity" | "original" => Ok(Self::Identity),
            "dilate" | "dilation" => Ok(Self::Dilate),
            "erode" | "erosion" => Ok(Self::Erode),
            "open" | "opening" => Ok(Self::Open),
            "close" | "closing" => Ok(Self::Close),
            "fill" | "fill-regions" | "fill_regions" | "region filling" => Ok(Self::FillRegions),
            _ => Err(MorphologyError::UnsupportedOperation(s.to_owned())),
        }
    }
}

/// One operation plus the parameters it reads.
///
/// `kernel_size`, `iterations` and `shape` only matter for the structural
/// operations; opening and closing always run a single round.
///
/// # Examples
///
/// ```rust
/// use morphox::{Operation, OperationRequest};
///
/// let request = OperationRequest::new(Operation::Dilate)
///     .with_kernel_size(7)
///     .with_iterations(2);
/// assert!(request.validate().is_ok());
///
/// assert!(OperationRequest::new(Operation::Erode).with_kernel_size(4).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OperationRequest {
    pub operation: Operation,
    /// Side length of the structuring element (odd)
    pub kernel_size: u32,
    /// Number of dilation or erosion passes
    pub iterations: u32,
    pub shape: Shape,
}

impl OperationRequest {
    pub const DEFAULT_KERNEL_SIZE: u32 = 5;
    pub const DEFAULT_ITERATIONS: u32 = 1;

    pub const fn new(operation: Operation) -> Self {
        Self {
            operation,
            kernel_size: Self::DEFAULT_KERNEL_SIZE,
            iterations: Self::DEFAULT_ITERATIONS,
            shape: Shape::Rectangle,
        }
    }

    pub const fn with_kernel_size(mut self, kernel_size: u32) -> Self {
        self.kernel_size = kernel_size;
        self
    }

    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub const fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    /// Check the parameters the selected operation reads.
    ///
    /// # Errors
    ///
    /// * `MorphologyError::InvalidKernelSize` - If the kernel size is zero or even
    /// * `MorphologyError::InvalidIterations` - If the iteration count is zero
    pub fn validate(&self) -> Result<(), MorphologyError> {
        if !self.operation.uses_structuring_element() {
            return Ok(());
        }
        validate_kernel_size(self.kernel_size)?;
        if self.iterations == 0 {
            return Err(MorphologyError::InvalidIterations {
                iterations: self.iterations,
            });
        }
        Ok(())
    }
}

impl Default for OperationRequest {
    fn default() -> Self {
        Self::new(Operation::Identity)
    }
}

/// Run one request against a pixel buffer.
///
/// Parameters are validated before any buffer is allocated. The result has
/// the input's width and height; structural operations keep the channel
/// count, region filling always returns three identical channels.
///
/// # Errors
///
/// * `MorphologyError::InvalidKernelSize` / `MorphologyError::InvalidIterations` -
///   If the request carries invalid parameters
/// * `MorphologyError::EmptyImage` - If the buffer has no pixels
///
/// # Examples
///
/// ```rust
/// use image::{GrayImage, Luma};
/// use morphox::{apply, Operation, OperationRequest, PixelBuffer};
///
/// let mut image = GrayImage::new(11, 11);
/// image.put_pixel(5, 5, Luma([255]));
///
/// let request = OperationRequest::new(Operation::Dilate).with_kernel_size(3);
/// let result = apply(&PixelBuffer::Gray(image), &request).unwrap();
///
/// assert_eq!(result.dimensions(), (11, 11));
/// assert_eq!(result.channel_count(), 1);
/// ```
pub fn apply(
    image: &PixelBuffer,
    request: &OperationRequest,
) -> Result<PixelBuffer, MorphologyError> {
    request.validate()?;
    let (width, height) = image.dimensions();
    validate_non_empty_image(width, height)?;

    debug!(
        "applying {} to {}x{}x{} (kernel {} {:?}, iterations {})",
        request.operation,
        width,
        height,
        image.channel_count(),
        request.kernel_size,
        request.shape,
        request.iterations
    );

    let element = || StructuringElement::new(request.shape, request.kernel_size);
    match request.operation {
        Operation::Identity => Ok(image.clone()),
        Operation::FillRegions => {
            let filled = match image {
                PixelBuffer::Gray(gray) => gray.fill_regions()?,
                PixelBuffer::Rgb(rgb) => rgb.fill_regions()?,
            };
            Ok(PixelBuffer::Rgb(filled))
        }
        Operation::Dilate => image.dilate(&element()?, request.iterations),
        Operation::Erode => image.erode(&element()?, request.iterations),
        Operation::Open => image.open(&element()?),
        Operation::Close => image.close(&element()?),
    }
}
