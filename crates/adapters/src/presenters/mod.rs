use std::path::Path;

use editopia_domain::SessionSummary;

pub fn present_session(summary: &SessionSummary) -> String {
    format!(
        "{}x{} filter={} exposure={:.2} saturation={:.2} undo={}/{}",
        summary.width,
        summary.height,
        summary.params.filter,
        summary.params.exposure,
        summary.params.saturation,
        summary.history_len,
        summary.history_capacity
    )
}

pub fn present_session_json(summary: &SessionSummary) -> String {
    serde_json::to_string(summary).unwrap_or_else(|error| {
        log::warn!("failed to serialize session summary: {error}");
        "{}".to_string()
    })
}

pub fn present_export(path: &Path) -> String {
    format!("Image saved as {}", path.display())
}

pub fn present_export_failure() -> &'static str {
    "Failed to save image."
}
