//! 5A's and 5R's onboarding wizards as explicit, persisted state.
//!
//! Each wizard is a plain [`WizardState`] value. The service loads it from a
//! [`WizardStore`], applies one transition and writes it back, so the HTTP layer
//! never holds wizard progress itself.

mod flow;
pub mod router;
mod service;
mod state;
mod store;


use axum::http::StatusCode;

pub use flow::{WizardFlow, WizardStep};
pub use router::wizard_router;
pub use service::WizardService;
pub use state::{StepAnswers, WizardState};
pub use store::{InMemoryWizardStore, StoreError, WizardStore, DEFAULT_MAX_SESSIONS};

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("no {flow} wizard in progress for session {session_id}")]
    NotFound {
        flow: WizardFlow,
        session_id: String,
    },
    #[error("the {0} wizard is already completed")]
    Completed(WizardFlow),
    #[error("step {step:?} does not belong to the {flow} wizard")]
    WrongFlow { step: WizardStep, flow: WizardFlow },
    #[error("expected answers for {expected:?}, received {found:?}")]
    OutOfOrder {
        expected: WizardStep,
        found: WizardStep,
    },
    #[error("step {0:?} has no recorded answers")]
    MissingAnswers(WizardStep),
    #[error("unknown wizard '{0}'")]
    UnknownFlow(String),
    #[error("unknown wizard step '{0}'")]
    UnknownStep(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl WizardError {
    pub fn status(&self) -> StatusCode {
        match self {
            WizardError::NotFound { .. } => StatusCode::NOT_FOUND,
            WizardError::Completed(_)
            | WizardError::WrongFlow { .. }
            | WizardError::OutOfOrder { .. }
            | WizardError::MissingAnswers(_) => StatusCode::CONFLICT,
            WizardError::UnknownFlow(_) | WizardError::UnknownStep(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            WizardError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
