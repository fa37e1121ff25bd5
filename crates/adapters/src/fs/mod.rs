mod encoder;

pub use encoder::{rgb_image_from_buffer, JpegImageEncoder, DEFAULT_JPEG_QUALITY};
