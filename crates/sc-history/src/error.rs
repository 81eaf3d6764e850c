use thiserror::Error;

pub type HistoryResult<T> = Result<T, HistoryError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("History capacity must be at least 1")]
    ZeroCapacity,

    #[error("History holds {len} entries but capacity is {capacity}")]
    OverCapacity { len: usize, capacity: usize },

    #[error("Cursor out of bounds (index={index}, len={len})")]
    CursorOob { index: usize, len: usize },

    #[error("Cursor must be set when history is non-empty (len={len})")]
    MissingCursor { len: usize },
}
