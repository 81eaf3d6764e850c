//! Store settings loaded from YAML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Maximum number of snapshots kept for time travel.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

fn default_history_capacity() -> usize {
    sc_history::DEFAULT_CAPACITY
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
            what: "settings",
            path: path.to_path_buf(),
            source: e,
        })?;
        let settings: Settings = serde_yaml::from_str(&content).map_err(|e| AppError::Parse {
            what: "settings",
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Settings from `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> AppResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.history_capacity == 0 {
            return Err(AppError::InvalidInput(
                "history_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
