//! Session store: the active session plus its time-travel history.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use sc_history::TimeMachine;
use sc_session::{AlloyStore, Configurations, SessionSnapshot, short_fingerprint, validate_snapshot};

use crate::error::{AppError, AppResult};
use crate::settings::Settings;

/// Length of fingerprints shown in timelines.
const FINGERPRINT_LEN: usize = 12;

/// Everything a UI or script can ask the store to do.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Action {
    UpdateConfigurations { configurations: Configurations },
    UpdateAlloyStore { alloy_store: AlloyStore },
    SetDilution { dilution: f64 },
    StepBack,
    StepForward,
    JumpTo { index: usize },
    Reset,
}

/// What a dispatched action did.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// A snapshot was pushed and is now current.
    Recorded { index: usize, evicted: bool },
    /// A stored snapshot was loaded into the active session.
    Loaded { index: usize },
    /// Navigation past a boundary; nothing changed.
    Ignored,
    /// History cleared and the baseline session restored.
    Reset,
}

/// One row of a rendered history list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimelineEntry {
    pub index: usize,
    pub fingerprint: String,
    pub captured_at: DateTime<Utc>,
    pub is_current: bool,
}

/// Active session and history.
///
/// `active` always has the content of `history.current()`, and every stored
/// snapshot passes validation; deserialization re-checks both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawSessionStore")]
pub struct SessionStore {
    baseline: SessionSnapshot,
    active: SessionSnapshot,
    history: TimeMachine<SessionSnapshot>,
}

impl SessionStore {
    /// Start a session from `initial`, recorded as the first history entry.
    pub fn new(initial: SessionSnapshot, settings: &Settings) -> AppResult<Self> {
        settings.validate()?;
        validate_snapshot(&initial)?;

        let mut history = TimeMachine::with_capacity(settings.history_capacity)?;
        history.add_snapshot(initial.clone());
        info!(
            capacity = settings.history_capacity,
            "session store created"
        );

        Ok(Self {
            baseline: initial.clone(),
            active: initial,
            history,
        })
    }

    /// Apply one action. Validation failures leave the store untouched.
    pub fn dispatch(&mut self, action: Action) -> AppResult<Outcome> {
        debug!(?action, "dispatch");
        match action {
            Action::UpdateConfigurations { configurations } => {
                let mut next = self.active.clone();
                next.configurations = configurations;
                self.record(next)
            }
            Action::UpdateAlloyStore { mut alloy_store } => {
                alloy_store.update_mix();
                let mut next = self.active.clone();
                next.alloy_store = alloy_store;
                self.record(next)
            }
            Action::SetDilution { dilution } => {
                let mut next = self.active.clone();
                next.alloy_store.dilution = dilution;
                next.alloy_store.update_mix();
                self.record(next)
            }
            Action::StepBack => {
                let loaded = self.history.step_back().cloned();
                Ok(self.load(loaded))
            }
            Action::StepForward => {
                let loaded = self.history.step_forward().cloned();
                Ok(self.load(loaded))
            }
            Action::JumpTo { index } => {
                let loaded = self.history.jump_to(index).cloned();
                Ok(self.load(loaded))
            }
            Action::Reset => {
                self.history.clear();
                self.active = self.baseline.recaptured();
                self.history.add_snapshot(self.active.clone());
                info!("session reset");
                Ok(Outcome::Reset)
            }
        }
    }

    fn record(&mut self, next: SessionSnapshot) -> AppResult<Outcome> {
        if let Err(err) = validate_snapshot(&next) {
            warn!(%err, "rejected session update");
            return Err(AppError::from(err));
        }

        let next = next.recaptured();
        self.active = next.clone();
        let evicted = self.history.add_snapshot(next).is_some();
        let index = self.history.current_index().unwrap_or(0);
        Ok(Outcome::Recorded { index, evicted })
    }

    fn load(&mut self, loaded: Option<SessionSnapshot>) -> Outcome {
        match (loaded, self.history.current_index()) {
            (Some(snapshot), Some(index)) => {
                self.active = snapshot;
                Outcome::Loaded { index }
            }
            _ => {
                debug!("navigation at history boundary ignored");
                Outcome::Ignored
            }
        }
    }

    /// Session currently shown and simulated.
    pub fn active(&self) -> &SessionSnapshot {
        &self.active
    }

    pub fn history(&self) -> &TimeMachine<SessionSnapshot> {
        &self.history
    }

    pub fn can_step_back(&self) -> bool {
        self.history.can_step_back()
    }

    pub fn can_step_forward(&self) -> bool {
        self.history.can_step_forward()
    }

    /// History rows, oldest first.
    pub fn timeline(&self) -> AppResult<Vec<TimelineEntry>> {
        let current = self.history.current_index();
        self.history
            .iter()
            .enumerate()
            .map(|(index, snapshot)| -> AppResult<TimelineEntry> {
                Ok(TimelineEntry {
                    index,
                    fingerprint: short_fingerprint(snapshot, FINGERPRINT_LEN)?,
                    captured_at: snapshot.captured_at,
                    is_current: current == Some(index),
                })
            })
            .collect()
    }
}

/// Unchecked wire form of [`SessionStore`].
#[derive(Deserialize)]
struct RawSessionStore {
    baseline: SessionSnapshot,
    active: SessionSnapshot,
    history: TimeMachine<SessionSnapshot>,
}

impl TryFrom<RawSessionStore> for SessionStore {
    type Error = AppError;

    fn try_from(raw: RawSessionStore) -> AppResult<Self> {
        validate_snapshot(&raw.baseline)
            .map_err(|e| AppError::Validation(format!("baseline: {}", e)))?;
        for (index, snapshot) in raw.history.iter().enumerate() {
            validate_snapshot(snapshot)
                .map_err(|e| AppError::Validation(format!("history entry {}: {}", index, e)))?;
        }

        match raw.history.current() {
            Some(cursor) if cursor.same_content(&raw.active) => {}
            Some(_) => {
                return Err(AppError::InvalidInput(
                    "active session differs from the history entry under the cursor".to_string(),
                ));
            }
            None => {
                return Err(AppError::InvalidInput(
                    "history is empty; a store always holds its initial session".to_string(),
                ));
            }
        }

        Ok(Self {
            baseline: raw.baseline,
            active: raw.active,
            history: raw.history,
        })
    }
}

/// Persist the whole store (session and history) as JSON.
pub fn save_store(path: &Path, store: &SessionStore) -> AppResult<()> {
    let content = serde_json::to_string_pretty(store).map_err(|e| AppError::Parse {
        what: "session store",
        message: e.to_string(),
    })?;
    std::fs::write(path, content).map_err(|e| AppError::FileWrite {
        what: "session store",
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Load a store written by [`save_store`].
///
/// Fails unless every snapshot is valid, the history is within capacity and
/// the active session matches the entry under the cursor.
pub fn load_store(path: &Path) -> AppResult<SessionStore> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        what: "session store",
        path: path.to_path_buf(),
        source: e,
    })?;
    let store: SessionStore = serde_json::from_str(&content).map_err(|e| AppError::Parse {
        what: "session store",
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), entries = store.history.len(), "store loaded");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_session::{Alloy, Element};

    fn initial() -> SessionSnapshot {
        SessionSnapshot::new(
            Configurations::default(),
            AlloyStore::single(Alloy {
                name: "1020".to_string(),
                compositions: vec![Element::new("C", 0.2), Element::new("Mn", 0.45)],
            }),
        )
    }

    fn store(capacity: usize) -> SessionStore {
        SessionStore::new(
            initial(),
            &Settings {
                history_capacity: capacity,
            },
        )
        .unwrap()
    }

    fn grain(store: &SessionStore) -> f64 {
        store.active().configurations.grain_size
    }

    fn set_grain(store: &mut SessionStore, grain_size: f64) -> AppResult<Outcome> {
        store.dispatch(Action::UpdateConfigurations {
            configurations: Configurations {
                grain_size,
                ..Configurations::default()
            },
        })
    }

    #[test]
    fn new_store_records_initial_session() {
        let s = store(5);
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.history().current_index(), Some(0));
        assert!(!s.can_step_back());
    }

    #[test]
    fn update_records_and_activates() {
        let mut s = store(5);
        let outcome = set_grain(&mut s, 6.0).unwrap();
        assert_eq!(outcome, Outcome::Recorded { index: 1, evicted: false });
        assert_eq!(grain(&s), 6.0);
        assert_eq!(s.history().current(), Some(s.active()));
    }

    #[test]
    fn navigation_loads_snapshots() {
        let mut s = store(5);
        set_grain(&mut s, 6.0).unwrap();
        set_grain(&mut s, 7.0).unwrap();

        assert_eq!(s.dispatch(Action::StepBack).unwrap(), Outcome::Loaded { index: 1 });
        assert_eq!(grain(&s), 6.0);
        assert_eq!(s.dispatch(Action::JumpTo { index: 0 }).unwrap(), Outcome::Loaded { index: 0 });
        assert_eq!(grain(&s), 8.0);
        assert_eq!(s.dispatch(Action::StepBack).unwrap(), Outcome::Ignored);
        assert_eq!(s.dispatch(Action::StepForward).unwrap(), Outcome::Loaded { index: 1 });
    }

    #[test]
    fn invalid_update_leaves_state_untouched() {
        let mut s = store(5);
        let before = s.clone();
        let err = set_grain(&mut s, -1.0).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(s, before);
    }

    #[test]
    fn eviction_is_reported() {
        let mut s = store(2);
        assert_eq!(
            set_grain(&mut s, 6.0).unwrap(),
            Outcome::Recorded { index: 1, evicted: false }
        );
        assert_eq!(
            set_grain(&mut s, 7.0).unwrap(),
            Outcome::Recorded { index: 1, evicted: true }
        );
    }

    #[test]
    fn dilution_recomputes_mix() {
        let mut s = store(5);
        let parent = s.active().alloy_store.parent.clone();
        let weld = Alloy {
            name: "weld".to_string(),
            compositions: vec![Element::new("C", 0.0)],
        };
        s.dispatch(Action::UpdateAlloyStore {
            alloy_store: AlloyStore::mixed(parent, weld, 0.0),
        })
        .unwrap();
        s.dispatch(Action::SetDilution { dilution: 50.0 }).unwrap();

        let mix = s.active().alloy_store.mix.as_ref().unwrap();
        assert!((mix.weight_of("C") - 0.1).abs() < 1e-12);
    }

    #[test]
    fn reset_restores_baseline() {
        let mut s = store(5);
        set_grain(&mut s, 6.0).unwrap();
        set_grain(&mut s, 7.0).unwrap();
        assert_eq!(s.dispatch(Action::Reset).unwrap(), Outcome::Reset);
        assert_eq!(s.history().len(), 1);
        assert_eq!(grain(&s), 8.0);
    }

    fn raw(s: &SessionStore) -> RawSessionStore {
        RawSessionStore {
            baseline: s.baseline.clone(),
            active: s.active.clone(),
            history: s.history.clone(),
        }
    }

    #[test]
    fn consistent_store_converts() {
        let mut s = store(5);
        set_grain(&mut s, 6.0).unwrap();
        let mut wire = raw(&s);
        wire.active = wire.active.recaptured();
        let rebuilt = SessionStore::try_from(wire).unwrap();
        assert_eq!(rebuilt.history, s.history);
    }

    #[test]
    fn invalid_baseline_rejected() {
        let s = store(5);
        let mut wire = raw(&s);
        wire.baseline.configurations.start_temp = f64::NAN;
        let err = SessionStore::try_from(wire).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.starts_with("baseline")));
    }

    #[test]
    fn empty_history_rejected() {
        let s = store(5);
        let mut wire = raw(&s);
        wire.history.clear();
        assert!(matches!(
            SessionStore::try_from(wire),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn timeline_marks_cursor() {
        let mut s = store(5);
        set_grain(&mut s, 6.0).unwrap();
        s.dispatch(Action::StepBack).unwrap();

        let rows = s.timeline().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_current);
        assert!(!rows[1].is_current);
        assert_eq!(rows[0].fingerprint.len(), FINGERPRINT_LEN);
        assert_ne!(rows[0].fingerprint, rows[1].fingerprint);
    }
}
