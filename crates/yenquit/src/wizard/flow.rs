use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::WizardError;

/// Counseling framework driving an onboarding wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardFlow {
    FiveAs,
    FiveRs,
}

impl WizardFlow {
    pub const fn steps(self) -> &'static [WizardStep] {
        match self {
            Self::FiveAs => &[
                WizardStep::Ask,
                WizardStep::Advise,
                WizardStep::Assess,
                WizardStep::Assist,
                WizardStep::Arrange,
            ],
            Self::FiveRs => &[
                WizardStep::Relevance,
                WizardStep::Risks,
                WizardStep::Rewards,
                WizardStep::Roadblocks,
                WizardStep::Repetition,
            ],
        }
    }

    pub const fn first_step(self) -> WizardStep {
        match self {
            Self::FiveAs => WizardStep::Ask,
            Self::FiveRs => WizardStep::Relevance,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FiveAs => "five_as",
            Self::FiveRs => "five_rs",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FiveAs => "5A's",
            Self::FiveRs => "5R's",
        }
    }
}

impl FromStr for WizardFlow {
    type Err = WizardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "five_as" | "5as" | "5a" | "5a's" => Ok(Self::FiveAs),
            "five_rs" | "5rs" | "5r" | "5r's" => Ok(Self::FiveRs),
            _ => Err(WizardError::UnknownFlow(value.to_string())),
        }
    }
}

impl fmt::Display for WizardFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Ask,
    Advise,
    Assess,
    Assist,
    Arrange,
    Relevance,
    Risks,
    Rewards,
    Roadblocks,
    Repetition,
}

impl WizardStep {
    pub const fn flow(self) -> WizardFlow {
        match self {
            Self::Ask | Self::Advise | Self::Assess | Self::Assist | Self::Arrange => {
                WizardFlow::FiveAs
            }
            Self::Relevance | Self::Risks | Self::Rewards | Self::Roadblocks | Self::Repetition => {
                WizardFlow::FiveRs
            }
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ask => "Ask",
            Self::Advise => "Advise",
            Self::Assess => "Assess",
            Self::Assist => "Assist",
            Self::Arrange => "Arrange",
            Self::Relevance => "Relevance",
            Self::Risks => "Risks",
            Self::Rewards => "Rewards",
            Self::Roadblocks => "Roadblocks",
            Self::Repetition => "Repetition",
        }
    }

    /// Zero-based position within the step's own flow.
    pub fn position(self) -> usize {
        self.flow()
            .steps()
            .iter()
            .position(|step| *step == self)
            .unwrap_or(0)
    }

    pub fn next(self) -> Option<Self> {
        self.flow().steps().get(self.position() + 1).copied()
    }

    pub fn previous(self) -> Option<Self> {
        self.position()
            .checked_sub(1)
            .and_then(|index| self.flow().steps().get(index).copied())
    }
}

impl FromStr for WizardStep {
    type Err = WizardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        [WizardFlow::FiveAs, WizardFlow::FiveRs]
            .iter()
            .flat_map(|flow| flow.steps().iter().copied())
            .find(|step| step.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| WizardError::UnknownStep(value.to_string()))
    }
}
