#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidImageReason {
    #[error("image must have non-zero dimensions, got {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },
    #[error("cannot decode image: {0}")]
    Undecodable(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("invalid image: {reason}")]
    InvalidImage { reason: InvalidImageReason },
    #[error("image {width}x{height} needs {expected} pixels, got {actual}")]
    PixelCountMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("{name} must be within {range}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        range: &'static str,
    },
    #[error("unknown filter: {0}")]
    UnknownFilter(String),
}

impl DomainError {
    pub fn undecodable(cause: impl std::fmt::Display) -> Self {
        Self::InvalidImage {
            reason: InvalidImageReason::Undecodable(cause.to_string()),
        }
    }
}
