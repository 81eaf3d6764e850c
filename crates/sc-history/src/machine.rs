//! The history buffer and its cursor.

use std::collections::VecDeque;

use tracing::debug;

use crate::error::{HistoryError, HistoryResult};

/// Number of snapshots kept when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 20;

/// Bounded, chronological history of snapshots with a movable cursor.
///
/// - `data` is oldest-first; index 0 is evicted when the buffer is full
/// - `current` is `None` exactly when `data` is empty
/// - `data.len() <= capacity` at all times
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawTimeMachine<T>",
        bound(
            serialize = "T: serde::Serialize",
            deserialize = "T: serde::Deserialize<'de>"
        )
    )
)]
pub struct TimeMachine<T> {
    data: VecDeque<T>,
    current: Option<usize>,
    capacity: usize,
}

impl<T> Default for TimeMachine<T> {
    fn default() -> Self {
        Self {
            data: VecDeque::with_capacity(DEFAULT_CAPACITY),
            current: None,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl<T> TimeMachine<T> {
    /// Empty history with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty history holding at most `capacity` snapshots.
    pub fn with_capacity(capacity: usize) -> HistoryResult<Self> {
        if capacity == 0 {
            return Err(HistoryError::ZeroCapacity);
        }
        Ok(Self {
            data: VecDeque::with_capacity(capacity),
            current: None,
            capacity,
        })
    }

    /// Record a new snapshot and move the cursor onto it.
    ///
    /// Entries after the cursor (the redo branch) are discarded first. If the
    /// buffer is still full, the oldest entry is evicted and returned.
    pub fn add_snapshot(&mut self, entry: T) -> Option<T> {
        let keep = self.current.map_or(0, |c| c + 1);
        if keep < self.data.len() {
            debug!(
                pruned = self.data.len() - keep,
                "discarding redo branch"
            );
            self.data.truncate(keep);
        }

        let evicted = if self.data.len() == self.capacity {
            debug!(capacity = self.capacity, "history full, evicting oldest snapshot");
            self.data.pop_front()
        } else {
            None
        };

        self.data.push_back(entry);
        self.current = Some(self.data.len() - 1);
        debug!(len = self.data.len(), current = self.data.len() - 1, "snapshot added");

        evicted
    }

    /// Move the cursor one step towards older snapshots.
    ///
    /// Returns the snapshot to load, or `None` when already at the oldest
    /// entry (or empty); the history is left untouched in that case.
    pub fn step_back(&mut self) -> Option<&T> {
        match self.current {
            Some(c) if c > 0 => {
                self.current = Some(c - 1);
                debug!(current = c - 1, "stepped back");
                self.data.get(c - 1)
            }
            _ => None,
        }
    }

    /// Move the cursor one step towards newer snapshots.
    ///
    /// Returns the snapshot to load, or `None` at the newest entry.
    pub fn step_forward(&mut self) -> Option<&T> {
        match self.current {
            Some(c) if c + 1 < self.data.len() => {
                self.current = Some(c + 1);
                debug!(current = c + 1, "stepped forward");
                self.data.get(c + 1)
            }
            _ => None,
        }
    }

    /// Put the cursor on `index` if it names an existing snapshot.
    pub fn jump_to(&mut self, index: usize) -> Option<&T> {
        if index >= self.data.len() {
            return None;
        }
        self.current = Some(index);
        debug!(current = index, "jumped");
        self.data.get(index)
    }

    /// Drop every snapshot and reset the cursor.
    pub fn clear(&mut self) {
        self.data.clear();
        self.current = None;
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> Option<&T> {
        self.current.and_then(|c| self.data.get(c))
    }

    /// Cursor position; `None` when empty.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn can_step_back(&self) -> bool {
        matches!(self.current, Some(c) if c > 0)
    }

    pub fn can_step_forward(&self) -> bool {
        matches!(self.current, Some(c) if c + 1 < self.data.len())
    }

    /// Snapshots oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.data.iter()
    }

    /// Snapshots oldest-first as the ring buffer's two halves; the first
    /// slice holds the older entries and either slice may be empty.
    pub fn entries(&self) -> (&[T], &[T]) {
        self.data.as_slices()
    }
}

/// Unchecked wire form; converted with invariant checks on load.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTimeMachine<T> {
    data: VecDeque<T>,
    current: Option<usize>,
    capacity: usize,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawTimeMachine<T>> for TimeMachine<T> {
    type Error = HistoryError;

    fn try_from(raw: RawTimeMachine<T>) -> HistoryResult<Self> {
        let len = raw.data.len();
        if raw.capacity == 0 {
            return Err(HistoryError::ZeroCapacity);
        }
        if len > raw.capacity {
            return Err(HistoryError::OverCapacity {
                len,
                capacity: raw.capacity,
            });
        }
        match raw.current {
            Some(index) if index >= len => return Err(HistoryError::CursorOob { index, len }),
            None if len > 0 => return Err(HistoryError::MissingCursor { len }),
            _ => {}
        }
        Ok(Self {
            data: raw.data,
            current: raw.current,
            capacity: raw.capacity,
        })
    }
}
