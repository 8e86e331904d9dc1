use serde::Serialize;

use super::domain::{DependenceLevel, FagerstromScore, HealthFlags, Modality};
use super::interpret::dependence_level;
use crate::error::InvalidInputError;

/// Nicotine replacement tier selected from the score and modality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TherapyTier {
    CombinationTherapy,
    FullStrengthPatchOrGum,
    LowDoseOrBehavioral,
    IntensiveLozenge,
    StandardLozenge,
}

impl TherapyTier {
    pub fn select(score: FagerstromScore, modality: Modality) -> Self {
        let score = score.value();
        match modality {
            Modality::Smoked if score >= 7 => Self::CombinationTherapy,
            Modality::Smoked if score >= 5 => Self::FullStrengthPatchOrGum,
            Modality::Smoked => Self::LowDoseOrBehavioral,
            Modality::Smokeless if score >= 6 => Self::IntensiveLozenge,
            Modality::Smokeless => Self::StandardLozenge,
        }
    }

    pub const fn plan(self) -> &'static str {
        match self {
            Self::CombinationTherapy => {
                "Combination therapy: 21mg nicotine patch plus 4mg nicotine gum or lozenge for breakthrough cravings."
            }
            Self::FullStrengthPatchOrGum => {
                "21mg nicotine patch, or 2mg nicotine gum used frequently through the day."
            }
            Self::LowDoseOrBehavioral => {
                "Low-dose patch (7-14mg) or behavioral support without medication."
            }
            Self::IntensiveLozenge => "4mg nicotine lozenge with intensive counseling.",
            Self::StandardLozenge => "2mg nicotine lozenge with behavioral support.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyWarning {
    RecentCardiacEvent,
    Pregnancy,
}

impl SafetyWarning {
    pub const fn message(self) -> &'static str {
        match self {
            Self::RecentCardiacEvent => {
                "Recent cardiac event: consult a physician before starting nicotine replacement therapy."
            }
            Self::Pregnancy => {
                "Pregnancy: behavioral therapy is preferred over nicotine replacement therapy."
            }
        }
    }

    /// Warnings raised by the flags, cardiac first.
    pub fn from_flags(flags: &HealthFlags) -> Vec<Self> {
        let mut warnings = Vec::new();
        if flags.recent_cardiac_event {
            warnings.push(Self::RecentCardiacEvent);
        }
        if flags.is_pregnant {
            warnings.push(Self::Pregnancy);
        }
        warnings
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TherapyPlan {
    pub tier: TherapyTier,
    pub plan: String,
    pub warnings: Vec<String>,
}

pub fn recommend(
    score: i64,
    modality: Modality,
    flags: Option<&HealthFlags>,
) -> Result<TherapyPlan, InvalidInputError> {
    let score = FagerstromScore::new(score)?;
    Ok(plan_for(score, modality, flags))
}

pub(crate) fn plan_for(
    score: FagerstromScore,
    modality: Modality,
    flags: Option<&HealthFlags>,
) -> TherapyPlan {
    let tier = TherapyTier::select(score, modality);
    let warnings = flags
        .map(SafetyWarning::from_flags)
        .unwrap_or_default()
        .into_iter()
        .map(|warning| warning.message().to_string())
        .collect();

    TherapyPlan {
        tier,
        plan: tier.plan().to_string(),
        warnings,
    }
}

/// Label, plan and warnings for one questionnaire result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentReport {
    pub score: FagerstromScore,
    pub modality: Modality,
    pub level: DependenceLevel,
    pub label: &'static str,
    pub plan: String,
    pub tier: TherapyTier,
    pub warnings: Vec<String>,
}

pub fn assess(
    score: FagerstromScore,
    modality: Modality,
    flags: Option<&HealthFlags>,
) -> AssessmentReport {
    let level = dependence_level(score, modality);
    let TherapyPlan {
        tier,
        plan,
        warnings,
    } = plan_for(score, modality, flags);

    tracing::debug!(
        score = score.value(),
        %modality,
        label = level.label(),
        warnings = warnings.len(),
        "assessed nicotine dependence"
    );

    AssessmentReport {
        score,
        modality,
        level,
        label: level.label(),
        plan,
        tier,
        warnings,
    }
}
