//! sc-history: bounded undo/redo history with a movable cursor.
//!
//! The [`TimeMachine`] stores opaque snapshots in chronological order and
//! tracks which one is on display. Navigation past either end is ignored
//! rather than reported; callers gate their controls with
//! [`TimeMachine::can_step_back`] / [`TimeMachine::can_step_forward`].

pub mod error;
pub mod machine;

pub use error::{HistoryError, HistoryResult};
pub use machine::{DEFAULT_CAPACITY, TimeMachine};
