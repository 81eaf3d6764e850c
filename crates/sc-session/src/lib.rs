//! sc-session: simulation session snapshots (configuration + alloys).

pub mod alloy;
pub mod hash;
pub mod schema;
pub mod validate;

pub use hash::{fingerprint, short_fingerprint};
pub use schema::*;
pub use validate::{ValidationError, validate_snapshot};

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> SessionResult<SessionSnapshot> {
    let content = std::fs::read_to_string(path)?;
    let snapshot: SessionSnapshot = serde_yaml::from_str(&content)?;
    validate_snapshot(&snapshot)?;
    tracing::debug!(path = %path.display(), "loaded session snapshot");
    Ok(snapshot)
}

pub fn save_yaml(path: &std::path::Path, snapshot: &SessionSnapshot) -> SessionResult<()> {
    validate_snapshot(snapshot)?;
    let content = serde_yaml::to_string(snapshot)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> SessionResult<SessionSnapshot> {
    let content = std::fs::read_to_string(path)?;
    let snapshot: SessionSnapshot = serde_json::from_str(&content)?;
    validate_snapshot(&snapshot)?;
    tracing::debug!(path = %path.display(), "loaded session snapshot");
    Ok(snapshot)
}

pub fn save_json(path: &std::path::Path, snapshot: &SessionSnapshot) -> SessionResult<()> {
    validate_snapshot(snapshot)?;
    let content = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, content)?;
    Ok(())
}
