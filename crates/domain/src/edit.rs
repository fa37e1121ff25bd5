use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DomainError;

pub const DEFAULT_EXPOSURE: f32 = 1.0;
pub const DEFAULT_SATURATION: f32 = 1.0;
pub const EXPOSURE_MIN_EXCLUSIVE: f32 = 0.10;
pub const EXPOSURE_MAX: f32 = 3.00;
pub const SATURATION_MIN: f32 = 0.00;
pub const SATURATION_MAX: f32 = 2.00;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    #[default]
    None,
    Warm,
    Cool,
    Vintage,
    Sepia,
    BlackAndWhite,
}

impl FilterKind {
    pub const ALL: [FilterKind; 6] = [
        FilterKind::None,
        FilterKind::Warm,
        FilterKind::Cool,
        FilterKind::Vintage,
        FilterKind::Sepia,
        FilterKind::BlackAndWhite,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Warm => "Warm",
            Self::Cool => "Cool",
            Self::Vintage => "Vintage",
            Self::Sepia => "Sepia",
            Self::BlackAndWhite => "B&W",
        }
    }
}

impl Display for FilterKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FilterKind {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "warm" => Ok(Self::Warm),
            "cool" => Ok(Self::Cool),
            "vintage" => Ok(Self::Vintage),
            "sepia" => Ok(Self::Sepia),
            "b&w" | "bw" | "black-and-white" | "black_and_white" => Ok(Self::BlackAndWhite),
            _ => Err(DomainError::UnknownFilter(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Exposure,
    Saturation,
}

impl Adjustment {
    pub fn name(self) -> &'static str {
        match self {
            Self::Exposure => "exposure",
            Self::Saturation => "saturation",
        }
    }

    pub fn contains(self, factor: f32) -> bool {
        match self {
            Self::Exposure => factor > EXPOSURE_MIN_EXCLUSIVE && factor <= EXPOSURE_MAX,
            Self::Saturation => (SATURATION_MIN..=SATURATION_MAX).contains(&factor),
        }
    }

    /// Rejects NaN as well, since every comparison with it fails.
    pub fn validate(self, factor: f32) -> Result<f32, DomainError> {
        if !self.contains(factor) {
            return Err(DomainError::OutOfRange {
                name: self.name(),
                value: factor,
                range: match self {
                    Self::Exposure => "(0.10, 3.00]",
                    Self::Saturation => "[0.00, 2.00]",
                },
            });
        }
        Ok(factor)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EditParams {
    pub filter: FilterKind,
    pub exposure: f32,
    pub saturation: f32,
}

impl Default for EditParams {
    fn default() -> Self {
        Self {
            filter: FilterKind::None,
            exposure: DEFAULT_EXPOSURE,
            saturation: DEFAULT_SATURATION,
        }
    }
}

impl EditParams {
    pub fn validate(&self) -> Result<(), DomainError> {
        Adjustment::Exposure.validate(self.exposure)?;
        Adjustment::Saturation.validate(self.saturation)?;
        Ok(())
    }
}
