//! Session service layer for SimCCT.
//!
//! Provides the reducer-style [`SessionStore`] that owns the active session
//! and its time-travel history, plus settings and script replay used by the
//! CLI.

pub mod error;
pub mod script;
pub mod settings;
pub mod store;

pub use error::{AppError, AppResult};
pub use script::{ReplayReport, ReplayStep, Script, load_script, replay_script};
pub use settings::Settings;
pub use store::{Action, Outcome, SessionStore, TimelineEntry, load_store, save_store};
