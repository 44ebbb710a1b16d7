pub mod codec;
pub mod morphology;
pub mod operation;
pub mod pixel_buffer;
pub mod region_fill;
pub mod structuring_element;
