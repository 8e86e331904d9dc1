use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::flow::WizardFlow;
use super::state::WizardState;
use super::WizardError;

/// Sessions kept by [`InMemoryWizardStore::default`].
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Persistence boundary for wizard progress, keyed by flow and session.
pub trait WizardStore: Send + Sync {
    fn load(&self, flow: WizardFlow, session_id: &str) -> Result<Option<WizardState>, StoreError>;
    fn save(&self, state: &WizardState) -> Result<(), StoreError>;
    fn clear(&self, flow: WizardFlow, session_id: &str) -> Result<(), StoreError>;

    /// Loads, transforms and persists one wizard atomically with respect to
    /// other calls on the same store. Returns `Ok(None)` when no wizard exists;
    /// nothing is written when `apply` fails.
    fn update<F>(
        &self,
        flow: WizardFlow,
        session_id: &str,
        apply: F,
    ) -> Result<Option<WizardState>, WizardError>
    where
        F: FnOnce(&mut WizardState) -> Result<(), WizardError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("wizard store unavailable: {0}")]
    Unavailable(String),
    #[error("stored wizard state is unreadable: {0}")]
    Corrupt(#[from] serde_json::Error),
}

type SessionKey = (WizardFlow, String);

#[derive(Debug)]
struct StoredWizard {
    json: String,
    last_used: u64,
}

#[derive(Debug)]
struct Sessions {
    entries: HashMap<SessionKey, StoredWizard>,
    max_sessions: usize,
    clock: u64,
}

impl Sessions {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn read(&mut self, key: &SessionKey) -> Option<String> {
        let now = self.tick();
        self.entries.get_mut(key).map(|stored| {
            stored.last_used = now;
            stored.json.clone()
        })
    }

    fn write(&mut self, key: SessionKey, json: String) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_sessions {
            self.evict_least_recent();
        }
        let last_used = self.tick();
        self.entries.insert(key, StoredWizard { json, last_used });
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, stored)| stored.last_used)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
            tracing::debug!(flow = %key.0, session_id = %key.1, "evicted idle wizard session");
        }
    }
}

/// Session-scoped store holding each wizard as serialized JSON, the way the
/// browser mirrors it into session storage.
///
/// Holds at most `max_sessions` wizards; writing a new session beyond that
/// drops the one touched least recently.
#[derive(Debug, Clone)]
pub struct InMemoryWizardStore {
    sessions: Arc<Mutex<Sessions>>,
}

impl Default for InMemoryWizardStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_SESSIONS)
    }
}

impl InMemoryWizardStore {
    pub fn with_capacity(max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(Sessions {
                entries: HashMap::new(),
                max_sessions: max_sessions.max(1),
                clock: 0,
            })),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .map(|guard| guard.entries.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned<T>(_: T) -> StoreError {
        StoreError::Unavailable("wizard store mutex poisoned".to_string())
    }
}

impl WizardStore for InMemoryWizardStore {
    fn load(&self, flow: WizardFlow, session_id: &str) -> Result<Option<WizardState>, StoreError> {
        let key = (flow, session_id.to_string());
        let raw = self.sessions.lock().map_err(Self::poisoned)?.read(&key);
        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &WizardState) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(state)?;
        let mut guard = self.sessions.lock().map_err(Self::poisoned)?;
        guard.write((state.flow, state.session_id.clone()), encoded);
        Ok(())
    }

    fn clear(&self, flow: WizardFlow, session_id: &str) -> Result<(), StoreError> {
        let mut guard = self.sessions.lock().map_err(Self::poisoned)?;
        guard.entries.remove(&(flow, session_id.to_string()));
        Ok(())
    }

    fn update<F>(
        &self,
        flow: WizardFlow,
        session_id: &str,
        apply: F,
    ) -> Result<Option<WizardState>, WizardError>
    where
        F: FnOnce(&mut WizardState) -> Result<(), WizardError>,
    {
        let key = (flow, session_id.to_string());
        let mut guard = self.sessions.lock().map_err(Self::poisoned)?;
        let Some(raw) = guard.read(&key) else {
            return Ok(None);
        };

        let mut state: WizardState = serde_json::from_str(&raw).map_err(StoreError::from)?;
        apply(&mut state)?;
        let encoded = serde_json::to_string(&state).map_err(StoreError::from)?;
        guard.write(key, encoded);
        Ok(Some(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{StepAnswers, WizardStep};
    use serde_json::json;

    #[test]
    fn saves_and_loads_by_flow_and_session() {
        let store = InMemoryWizardStore::default();
        let five_as = WizardState::start(WizardFlow::FiveAs, "sess-1");
        let five_rs = WizardState::start(WizardFlow::FiveRs, "sess-1");
        store.save(&five_as).expect("save");
        store.save(&five_rs).expect("save");

        assert_eq!(store.len(), 2);
        assert_eq!(
            store.load(WizardFlow::FiveAs, "sess-1").expect("load"),
            Some(five_as)
        );
        assert!(store.load(WizardFlow::FiveAs, "sess-2").expect("load").is_none());

        store.clear(WizardFlow::FiveRs, "sess-1").expect("clear");
        assert!(store.load(WizardFlow::FiveRs, "sess-1").expect("load").is_none());
    }

    #[test]
    fn full_store_drops_least_recently_used_session() {
        let store = InMemoryWizardStore::with_capacity(2);
        store
            .save(&WizardState::start(WizardFlow::FiveAs, "first"))
            .expect("save");
        store
            .save(&WizardState::start(WizardFlow::FiveAs, "second"))
            .expect("save");
        store.load(WizardFlow::FiveAs, "first").expect("load");

        store
            .save(&WizardState::start(WizardFlow::FiveAs, "third"))
            .expect("save");

        assert_eq!(store.len(), 2);
        assert!(store.load(WizardFlow::FiveAs, "first").expect("load").is_some());
        assert!(store.load(WizardFlow::FiveAs, "second").expect("load").is_none());
        assert!(store.load(WizardFlow::FiveAs, "third").expect("load").is_some());
    }

    #[test]
    fn rewriting_a_session_never_evicts() {
        let store = InMemoryWizardStore::with_capacity(1);
        let mut state = WizardState::start(WizardFlow::FiveRs, "only");
        store.save(&state).expect("save");
        state.completed = true;
        store.save(&state).expect("save again");

        assert_eq!(store.len(), 1);
        assert_eq!(store.load(WizardFlow::FiveRs, "only").expect("load"), Some(state));
    }

    #[test]
    fn failed_update_leaves_state_untouched() {
        let store = InMemoryWizardStore::default();
        let state = WizardState::start(WizardFlow::FiveAs, "sess-1");
        store.save(&state).expect("save");

        let err = store
            .update(WizardFlow::FiveAs, "sess-1", WizardState::advance)
            .expect_err("no answers recorded");
        assert!(matches!(err, WizardError::MissingAnswers(WizardStep::Ask)));
        assert_eq!(store.load(WizardFlow::FiveAs, "sess-1").expect("load"), Some(state));
        assert!(store
            .update(WizardFlow::FiveAs, "ghost", WizardState::back)
            .expect("missing session is not an error")
            .is_none());
    }

    #[test]
    fn concurrent_updates_are_not_lost() {
        let store = InMemoryWizardStore::default();
        store
            .save(&WizardState::start(WizardFlow::FiveAs, "shared"))
            .expect("save");

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        store
                            .update(WizardFlow::FiveAs, "shared", |state| {
                                let seen = state
                                    .answers_for(WizardStep::Ask)
                                    .and_then(|answers| answers.get("visits"))
                                    .and_then(|value| value.as_u64())
                                    .unwrap_or(0);
                                let mut answers = StepAnswers::new();
                                answers.insert("visits".to_string(), json!(seen + 1));
                                state.record(WizardStep::Ask, answers)
                            })
                            .expect("update");
                    }
                });
            }
        });

        let state = store
            .load(WizardFlow::FiveAs, "shared")
            .expect("load")
            .expect("stored");
        let visits = state
            .answers_for(WizardStep::Ask)
            .and_then(|answers| answers.get("visits"))
            .cloned();
        assert_eq!(visits, Some(json!(400)));
    }
}
