//! Navigation over trajectory groups.
//!
//! The cursor wraps in both directions. Transitions are pure; whoever owns the
//! [`NavigationState`] decides when to keep it between interactions.

use serde::{Deserialize, Serialize};

/// Direction of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Move to the following group, wrapping to the first.
    Next,
    /// Move to the preceding group, wrapping to the last.
    Previous,
}

/// Compute the cursor after one step over `count` groups.
///
/// Returns `None` when there are no groups. A cursor outside `[0, count)` is
/// first reduced modulo `count`.
#[must_use]
pub fn step(cursor: usize, count: usize, direction: Direction) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let cursor = cursor % count;
    Some(match direction {
        Direction::Next => (cursor + 1) % count,
        Direction::Previous => (cursor + count - 1) % count,
    })
}

/// Current position within a trajectory store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NavigationState {
    /// Index of the current group.
    pub cursor: usize,
}

impl NavigationState {
    /// Start at a given index.
    #[must_use]
    pub const fn at(cursor: usize) -> Self {
        Self { cursor }
    }

    /// State after one step; unchanged when `count` is zero.
    #[must_use]
    pub fn advance(self, count: usize, direction: Direction) -> Self {
        step(self.cursor, count, direction).map_or(self, Self::at)
    }

    /// State after moving to the next group.
    #[must_use]
    pub fn next(self, count: usize) -> Self {
        self.advance(count, Direction::Next)
    }

    /// State after moving to the previous group.
    #[must_use]
    pub fn previous(self, count: usize) -> Self {
        self.advance(count, Direction::Previous)
    }
}
