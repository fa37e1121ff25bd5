use std::path::Path;

use editopia_domain::ImageBuffer;

use crate::ApplicationError;

/// Turns a file on disk into an opaque RGB buffer. Unreadable or
/// undecodable input is `DomainError::InvalidImage`.
pub trait ImageDecoder {
    fn decode(&self, path: &Path) -> Result<ImageBuffer, ApplicationError>;
}

/// Writes a buffer with the single fixed output encoding.
pub trait ImageEncoder {
    fn encode(&self, image: &ImageBuffer, path: &Path) -> Result<(), ApplicationError>;
}
