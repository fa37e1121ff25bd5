use std::path::PathBuf;

use editopia_adapters::DEFAULT_JPEG_QUALITY;
use editopia_domain::DEFAULT_HISTORY_CAPACITY;

pub const OUTPUT_DIR_VAR: &str = "EDITOPIA_OUTPUT_DIR";
pub const JPEG_QUALITY_VAR: &str = "EDITOPIA_JPEG_QUALITY";
pub const HISTORY_CAPACITY_VAR: &str = "EDITOPIA_HISTORY_CAPACITY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub output_dir: PathBuf,
    pub jpeg_quality: u8,
    pub history_capacity: usize,
    pub preview_width: usize,
    pub preview_height: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            preview_width: 600,
            preview_height: 400,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = lookup(OUTPUT_DIR_VAR).filter(|dir| !dir.trim().is_empty()) {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(quality) = parse_override::<u8>(&lookup, JPEG_QUALITY_VAR) {
            if (1..=100).contains(&quality) {
                config.jpeg_quality = quality;
            } else {
                log::warn!("ignoring {JPEG_QUALITY_VAR}={quality}: expected 1-100");
            }
        }
        if let Some(capacity) = parse_override::<usize>(&lookup, HISTORY_CAPACITY_VAR) {
            if capacity >= 1 {
                config.history_capacity = capacity;
            } else {
                log::warn!("ignoring {HISTORY_CAPACITY_VAR}={capacity}: undo needs at least 1");
            }
        }
        config
    }
}

fn parse_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring {key}={raw}: not a valid number");
            None
        }
    }
}
