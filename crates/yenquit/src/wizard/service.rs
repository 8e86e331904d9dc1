use std::sync::Arc;

use tracing::info;

use super::flow::{WizardFlow, WizardStep};
use super::state::{StepAnswers, WizardState};
use super::store::WizardStore;
use super::WizardError;

/// Applies wizard transitions through an injected store.
pub struct WizardService<S> {
    store: Arc<S>,
}

impl<S> WizardService<S>
where
    S: WizardStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Starts (or restarts) a wizard for the session, discarding earlier progress.
    pub fn start(&self, flow: WizardFlow, session_id: &str) -> Result<WizardState, WizardError> {
        let state = WizardState::start(flow, session_id);
        self.store.save(&state)?;
        info!(%flow, session_id, "wizard started");
        Ok(state)
    }

    pub fn get(&self, flow: WizardFlow, session_id: &str) -> Result<WizardState, WizardError> {
        self.store
            .load(flow, session_id)?
            .ok_or_else(|| not_found(flow, session_id))
    }

    pub fn record(
        &self,
        flow: WizardFlow,
        session_id: &str,
        step: WizardStep,
        answers: StepAnswers,
    ) -> Result<WizardState, WizardError> {
        self.update(flow, session_id, |state| state.record(step, answers))
    }

    pub fn advance(&self, flow: WizardFlow, session_id: &str) -> Result<WizardState, WizardError> {
        let state = self.update(flow, session_id, WizardState::advance)?;
        if state.completed {
            info!(%flow, session_id, "wizard completed");
        }
        Ok(state)
    }

    pub fn back(&self, flow: WizardFlow, session_id: &str) -> Result<WizardState, WizardError> {
        self.update(flow, session_id, WizardState::back)
    }

    pub fn reset(&self, flow: WizardFlow, session_id: &str) -> Result<(), WizardError> {
        self.store.clear(flow, session_id)?;
        Ok(())
    }

    fn update<F>(
        &self,
        flow: WizardFlow,
        session_id: &str,
        apply: F,
    ) -> Result<WizardState, WizardError>
    where
        F: FnOnce(&mut WizardState) -> Result<(), WizardError>,
    {
        self.store
            .update(flow, session_id, apply)?
            .ok_or_else(|| not_found(flow, session_id))
    }
}

fn not_found(flow: WizardFlow, session_id: &str) -> WizardError {
    WizardError::NotFound {
        flow,
        session_id: session_id.to_string(),
    }
}
