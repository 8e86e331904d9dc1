use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::flow::{WizardFlow, WizardStep};
use super::WizardError;

/// Answers captured on a single wizard page.
pub type StepAnswers = Map<String, Value>;

/// Everything an onboarding wizard needs to resume on any page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardState {
    pub session_id: String,
    pub flow: WizardFlow,
    pub current_step: WizardStep,
    #[serde(default)]
    pub answers: BTreeMap<WizardStep, StepAnswers>,
    #[serde(default)]
    pub completed: bool,
}

impl WizardState {
    pub fn start(flow: WizardFlow, session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            flow,
            current_step: flow.first_step(),
            answers: BTreeMap::new(),
            completed: false,
        }
    }

    /// Stores the answers for the page the user is on, replacing earlier ones.
    pub fn record(&mut self, step: WizardStep, answers: StepAnswers) -> Result<(), WizardError> {
        self.ensure_open()?;
        if step.flow() != self.flow {
            return Err(WizardError::WrongFlow {
                step,
                flow: self.flow,
            });
        }
        if step != self.current_step {
            return Err(WizardError::OutOfOrder {
                expected: self.current_step,
                found: step,
            });
        }

        self.answers.insert(step, answers);
        Ok(())
    }

    /// Moves to the next page; leaving the last page completes the wizard.
    pub fn advance(&mut self) -> Result<(), WizardError> {
        self.ensure_open()?;
        if !self.answers.contains_key(&self.current_step) {
            return Err(WizardError::MissingAnswers(self.current_step));
        }

        match self.current_step.next() {
            Some(next) => self.current_step = next,
            None => self.completed = true,
        }
        Ok(())
    }

    /// Steps back one page, keeping recorded answers. Stays put on the first page.
    pub fn back(&mut self) -> Result<(), WizardError> {
        self.ensure_open()?;
        if let Some(previous) = self.current_step.previous() {
            self.current_step = previous;
        }
        Ok(())
    }

    pub fn answers_for(&self, step: WizardStep) -> Option<&StepAnswers> {
        self.answers.get(&step)
    }

    /// One-based page number and page count, for progress indicators.
    pub fn progress(&self) -> (usize, usize) {
        (self.current_step.position() + 1, self.flow.steps().len())
    }

    fn ensure_open(&self) -> Result<(), WizardError> {
        if self.completed {
            Err(WizardError::Completed(self.flow))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn answers(value: Value) -> StepAnswers {
        value.as_object().cloned().expect("object answers")
    }

    #[test]
    fn start_opens_on_first_step() {
        let state = WizardState::start(WizardFlow::FiveRs, "sess-1");
        assert_eq!(state.current_step, WizardStep::Relevance);
        assert_eq!(state.progress(), (1, 5));
        assert!(!state.completed);
    }

    #[test]
    fn advance_requires_answers_for_current_step() {
        let mut state = WizardState::start(WizardFlow::FiveAs, "sess-1");
        assert!(matches!(
            state.advance(),
            Err(WizardError::MissingAnswers(WizardStep::Ask))
        ));

        state
            .record(WizardStep::Ask, answers(json!({ "uses_tobacco": true })))
            .expect("record ask");
        state.advance().expect("advance");
        assert_eq!(state.current_step, WizardStep::Advise);
    }

    #[test]
    fn record_rejects_other_steps() {
        let mut state = WizardState::start(WizardFlow::FiveAs, "sess-1");
        assert!(matches!(
            state.record(WizardStep::Assess, StepAnswers::new()),
            Err(WizardError::OutOfOrder {
                expected: WizardStep::Ask,
                found: WizardStep::Assess
            })
        ));
        assert!(matches!(
            state.record(WizardStep::Risks, StepAnswers::new()),
            Err(WizardError::WrongFlow { .. })
        ));
    }

    #[test]
    fn finishing_last_step_completes_and_locks() {
        let mut state = WizardState::start(WizardFlow::FiveRs, "sess-2");
        for step in WizardFlow::FiveRs.steps() {
            state
                .record(*step, answers(json!({ "note": step.label() })))
                .expect("record");
            state.advance().expect("advance");
        }

        assert!(state.completed);
        assert_eq!(state.current_step, WizardStep::Repetition);
        assert!(matches!(
            state.back(),
            Err(WizardError::Completed(WizardFlow::FiveRs))
        ));
    }

    #[test]
    fn back_keeps_answers_and_stops_at_first_step() {
        let mut state = WizardState::start(WizardFlow::FiveAs, "sess-3");
        state.back().expect("no-op on first page");
        assert_eq!(state.current_step, WizardStep::Ask);

        state
            .record(WizardStep::Ask, answers(json!({ "uses_tobacco": true })))
            .expect("record");
        state.advance().expect("advance");
        state.back().expect("back");
        assert_eq!(state.current_step, WizardStep::Ask);
        assert!(state.answers_for(WizardStep::Ask).is_some());
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut state = WizardState::start(WizardFlow::FiveAs, "sess-4");
        state
            .record(WizardStep::Ask, answers(json!({ "cigarettes_per_day": 12 })))
            .expect("record");

        let encoded = serde_json::to_string(&state).expect("serializes");
        assert!(encoded.contains("\"ask\""));
        let decoded: WizardState = serde_json::from_str(&encoded).expect("deserializes");
        assert_eq!(decoded, state);
    }
}
