//! Replaying scripted action sequences against a fresh store.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use sc_session::SessionSnapshot;

use crate::error::{AppError, AppResult};
use crate::settings::Settings;
use crate::store::{Action, Outcome, SessionStore};

/// A starting session and the actions to apply to it, in order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Script {
    pub initial: SessionSnapshot,
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// Result of one scripted action.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayStep {
    pub step: usize,
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReplayReport {
    pub steps: Vec<ReplayStep>,
    pub store: SessionStore,
}

impl ReplayReport {
    pub fn rejected_count(&self) -> usize {
        self.steps.iter().filter(|s| s.error.is_some()).count()
    }
}

pub fn load_script(path: &Path) -> AppResult<Script> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
        what: "script",
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_yaml::from_str(&content).map_err(|e| AppError::Parse {
        what: "script",
        message: e.to_string(),
    })
}

/// Run every action of `script`. Rejected updates are reported per step and
/// do not stop the replay; an invalid initial session does.
pub fn replay_script(script: &Script, settings: &Settings) -> AppResult<ReplayReport> {
    let mut store = SessionStore::new(script.initial.clone(), settings)?;
    let mut steps = Vec::with_capacity(script.actions.len());

    for (step, action) in script.actions.iter().enumerate() {
        let (outcome, error) = match store.dispatch(action.clone()) {
            Ok(outcome) => (Some(outcome), None),
            Err(err @ AppError::Validation(_)) => {
                warn!(step, %err, "scripted action rejected");
                (None, Some(err.to_string()))
            }
            Err(err) => return Err(err),
        };
        steps.push(ReplayStep {
            step,
            action: action.clone(),
            outcome,
            error,
        });
    }

    Ok(ReplayReport { steps, store })
}
