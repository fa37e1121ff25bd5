mod edit;
mod error;
pub mod filters;
mod history;
mod hsb;
mod image;
mod session;

pub use edit::{
    Adjustment, EditParams, FilterKind, DEFAULT_EXPOSURE, DEFAULT_SATURATION, EXPOSURE_MAX,
    EXPOSURE_MIN_EXCLUSIVE, SATURATION_MAX, SATURATION_MIN,
};
pub use error::{DomainError, InvalidImageReason};
pub use history::{BoundedHistory, DEFAULT_HISTORY_CAPACITY};
pub use hsb::Hsb;
pub use image::{ImageBuffer, Rgb};
pub use session::{EditSession, SessionSummary};
