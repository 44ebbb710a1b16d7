use std::io::Cursor;

use image::ImageFormat;

use crate::error::CodecError;
use crate::morphox::pixel_buffer::PixelBuffer;

/// Decode an encoded raster (PNG, JPEG or BMP) into a pixel buffer.
///
/// The container format is guessed from the leading bytes.
///
/// # Errors
///
/// * `CodecError::Image` - If the bytes are not a supported image
/// * `CodecError::EmptyImage` - If the decoded image has no pixels
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, CodecError> {
    let image = image::load_from_memory(bytes)?;
    PixelBuffer::from_dynamic(image)
}

/// Encode a pixel buffer as PNG bytes.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, CodecError> {
    let mut cursor = Cursor::new(Vec::new());
    match buffer {
        PixelBuffer::Gray(image) => image.write_to(&mut cursor, ImageFormat::Png)?,
        PixelBuffer::Rgb(image) => image.write_to(&mut cursor, ImageFormat::Png)?,
    }
    Ok(cursor.into_inner())
}
