//! Error types for the sc-app service layer.

use std::path::PathBuf;

/// Application error type wrapping the lower crates' errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Session error: {0}")]
    Session(String),

    #[error("Session validation failed: {0}")]
    Validation(String),

    #[error("History error: {0}")]
    History(String),

    #[error("Failed to read {what} file: {path}")]
    FileRead {
        what: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {what} file: {path}")]
    FileWrite {
        what: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {what}: {message}")]
    Parse { what: &'static str, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sc-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<sc_session::SessionError> for AppError {
    fn from(err: sc_session::SessionError) -> Self {
        match err {
            sc_session::SessionError::Validation(v) => AppError::Validation(v.to_string()),
            other => AppError::Session(other.to_string()),
        }
    }
}

impl From<sc_session::ValidationError> for AppError {
    fn from(err: sc_session::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<sc_history::HistoryError> for AppError {
    fn from(err: sc_history::HistoryError) -> Self {
        AppError::History(err.to_string())
    }
}
