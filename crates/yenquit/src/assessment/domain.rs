use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;

/// How the tobacco is consumed; each modality has its own Fagerström table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Smoked,
    Smokeless,
}

impl Modality {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smoked => "smoked",
            Self::Smokeless => "smokeless",
        }
    }
}

impl FromStr for Modality {
    type Err = InvalidInputError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "smoked" => Ok(Self::Smoked),
            "smokeless" => Ok(Self::Smokeless),
            _ => Err(InvalidInputError::UnknownModality(value.to_string())),
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fagerström total, guaranteed to lie in 0..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FagerstromScore(u8);

impl FagerstromScore {
    pub const MAX: u8 = 10;

    pub fn new(raw: i64) -> Result<Self, InvalidInputError> {
        if (0..=i64::from(Self::MAX)).contains(&raw) {
            Ok(Self(raw as u8))
        } else {
            Err(InvalidInputError::ScoreOutOfRange(raw))
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for FagerstromScore {
    type Error = InvalidInputError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependenceLevel {
    VeryLow,
    Low,
    Moderate,
    Medium,
    High,
    VeryHigh,
}

impl DependenceLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low Dependence",
            Self::Low => "Low Dependence",
            Self::Moderate => "Moderate Dependence",
            Self::Medium => "Medium Dependence",
            Self::High => "High Dependence",
            Self::VeryHigh => "Very High Dependence",
        }
    }
}

/// Auxiliary health answers that only ever add safety warnings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthFlags {
    #[serde(default, alias = "recentCardiacEvent")]
    pub recent_cardiac_event: bool,
    #[serde(default, alias = "isPregnant")]
    pub is_pregnant: bool,
}
