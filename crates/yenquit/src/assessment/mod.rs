//! Fagerström nicotine-dependence scoring, interpretation and therapy plans.

pub mod domain;
mod interpret;
mod questionnaire;
mod recommend;
pub mod router;

pub use domain::{DependenceLevel, FagerstromScore, HealthFlags, Modality};
pub use interpret::{dependence_level, interpret};
pub use questionnaire::{FagerstromQuestion, QuestionOption, Questionnaire};
pub use recommend::{
    assess, recommend, AssessmentReport, SafetyWarning, TherapyPlan, TherapyTier,
};
pub use router::assessment_router;
