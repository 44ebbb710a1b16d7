use thiserror::Error;

/// Error type for morphological operations
///
/// Every variant is raised before any pixel work begins, so a failed call
/// never leaves a partially processed buffer behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MorphologyError {
    /// Structuring element size is zero or even
    ///
    /// The element needs a geometric center, so only odd sizes are accepted.
    #[error("Invalid kernel size {size}: must be a positive odd integer")]
    InvalidKernelSize { size: u32 },

    /// Iteration count is zero
    #[error("Invalid iteration count {iterations}: must be at least 1")]
    InvalidIterations { iterations: u32 },

    /// Operation name is not one of the recognized operations
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Image has a zero width or height
    #[error("Image dimensions must be non-zero")]
    EmptyImage,
}

/// Error type for decoding and encoding pixel buffers
#[derive(Debug, Error)]
pub enum CodecError {
    /// The underlying `image` codec failed
    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    /// Decoded image has a zero width or height
    #[error("Decoded image is empty")]
    EmptyImage,
}
