mod error;
mod morphox;
mod utils;

#[cfg(test)]
mod test_utils;

use image::{ImageBuffer, Pixel};

pub use error::{CodecError, MorphologyError};
pub use imageproc::region_labelling::Connectivity;
pub use morphox::codec::{decode, encode_png};
pub use morphox::morphology::MorphologyExt;
pub use morphox::operation::{apply, Operation, OperationRequest};
pub use morphox::pixel_buffer::PixelBuffer;
pub use morphox::region_fill::{
    binarize_otsu, fill_holes, normalize_polarity, Binarization, FillOptions, FillSeed,
    RegionFillExt,
};
pub use morphox::structuring_element::{Shape, StructuringElement};

pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;
