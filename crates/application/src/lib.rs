mod error;
mod ports;
mod service;
mod use_cases;

pub use error::ApplicationError;
pub use ports::{ImageDecoder, ImageEncoder};
pub use service::{export_file_name, ApplicationService, EXPORT_PREFIX};
pub use use_cases::{
    AdjustExposureCommand, AdjustSaturationCommand, ApplyFilterCommand, ExportCommand,
    LoadImageCommand, ResetCommand, SessionSummaryQuery, UndoCommand,
};
