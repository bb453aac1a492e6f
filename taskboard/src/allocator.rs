//! Identifier allocation.
//!
//! The next id is one past the largest numeric suffix ever handed out. The
//! largest suffix seen so far is kept in an [`IdSequence`] that is persisted
//! next to the board, so deleting the newest entity does not free its id.
//! Allocation assumes a single writer.

use std::collections::BTreeSet;

use crate::types::{Column, ColumnId, Task, TaskId};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Parse the numeric suffix of `id` after `prefix`.
///
/// Returns `None` for a wrong prefix, an empty suffix, any non-digit
/// character, or a value that overflows `u64`.
pub fn parse_sequence(id: &str, prefix: &str) -> Option<u64> {
    let digits = id.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Pick the next sequence number given the numbers in use and a floor that
/// the result must exceed.
///
/// The result is never in `used`. When `max + 1` does not fit in a `u64` the
/// smallest free positive number is returned instead.
pub fn next_sequence<I>(used: I, floor: u64) -> u64
where
    I: IntoIterator<Item = u64>,
{
    let used: BTreeSet<u64> = used.into_iter().collect();
    let max = used.last().copied().unwrap_or(0).max(floor);

    match max.checked_add(1) {
        Some(next) => next,
        None => {
            let free = (1..=u64::MAX)
                .find(|n| !used.contains(n))
                .unwrap_or(0);
            warn!(free, "id sequence exhausted, reusing lowest free number");
            free
        }
    }
}

/// Compute the next id for `prefix` given the ids already in use.
///
/// Malformed ids are skipped rather than rejected.
pub fn next_id<'a, I>(existing: I, prefix: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let used = existing
        .into_iter()
        .filter_map(|id| parse_sequence(id, prefix));
    format!("{}{}", prefix, next_sequence(used, 0))
}

/// High-water marks of the column and task id sequences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdSequence {
    /// Largest column suffix ever allocated
    pub column: u64,
    /// Largest task suffix ever allocated
    pub task: u64,
}

impl IdSequence {
    /// Allocate the id for a column appended after `columns`
    pub fn next_column(&mut self, columns: &[Column]) -> ColumnId {
        let n = next_sequence(columns.iter().filter_map(|c| c.id.sequence()), self.column);
        self.column = self.column.max(n);
        ColumnId::from_sequence(n)
    }

    /// Allocate the id for a task appended after `tasks`
    pub fn next_task(&mut self, tasks: &[Task]) -> TaskId {
        let n = next_sequence(tasks.iter().filter_map(|t| t.id.sequence()), self.task);
        self.task = self.task.max(n);
        TaskId::from_sequence(n)
    }
}
