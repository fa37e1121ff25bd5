use std::path::PathBuf;

use editopia_domain::FilterKind;

#[derive(Debug, Clone)]
pub struct LoadImageCommand {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy)]
pub struct ApplyFilterCommand {
    pub kind: FilterKind,
}

#[derive(Debug, Clone, Copy)]
pub struct AdjustExposureCommand {
    pub factor: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct AdjustSaturationCommand {
    pub factor: f32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UndoCommand;

#[derive(Debug, Clone, Copy, Default)]
pub struct ResetCommand;

#[derive(Debug, Clone)]
pub struct ExportCommand {
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionSummaryQuery;
