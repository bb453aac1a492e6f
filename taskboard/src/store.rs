//! BoardStore - the two ordered sequences a board is made of
//!
//! Columns and tasks live in two flat vectors. Column order is display order.
//! Task order is global; a column's tasks are the stable filter of that
//! sequence by `column_id`, so there is no per-column list to keep in sync.
//!
//! The store holds no policy beyond the cascade on column removal. Callers
//! derive indices from id lookups, which is why `reorder` treats a bad index
//! as a bug rather than a recoverable error.

use crate::types::{Column, ColumnId, EntityKind, Task, TaskId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ordered columns and tasks of one board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardStore {
    columns: Vec<Column>,
    tasks: Vec<Task>,
}

impl BoardStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from existing sequences
    pub fn from_parts(columns: Vec<Column>, tasks: Vec<Task>) -> Self {
        Self { columns, tasks }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Columns in display order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// All tasks in global order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| &c.id == id)
    }

    pub fn task_index(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    /// Tasks of one column, in within-column order
    pub fn tasks_in_column(&self, id: &ColumnId) -> impl Iterator<Item = &Task> + '_ {
        let id = id.clone();
        self.tasks.iter().filter(move |t| t.column_id == id)
    }

    /// Number of tasks in one column
    pub fn task_count(&self, id: &ColumnId) -> usize {
        self.tasks_in_column(id).count()
    }

    /// Tasks whose column no longer exists. These render under no column.
    pub fn orphaned_tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.tasks
            .iter()
            .filter(move |t| self.column(&t.column_id).is_none())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append a column. Id uniqueness is the allocator's job.
    pub fn insert_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Remove a column and every task in it
    ///
    /// Returns the removed column, or `None` if the id was not present (in
    /// which case nothing changes).
    pub fn remove_column(&mut self, id: &ColumnId) -> Option<Column> {
        let index = self.column_index(id)?;
        let column = self.columns.remove(index);

        let before = self.tasks.len();
        self.tasks.retain(|t| &t.column_id != id);
        let cascaded = before - self.tasks.len();
        debug!(column = %id, cascaded, "removed column");

        Some(column)
    }

    /// Append a task
    pub fn insert_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Remove a task; absent ids are a no-op
    pub fn remove_task(&mut self, id: &TaskId) -> Option<Task> {
        let index = self.task_index(id)?;
        Some(self.tasks.remove(index))
    }

    /// Array-move within one sequence: take the element at `from` out and
    /// reinsert it at `to`, shifting everything in between by one.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range for the sequence.
    pub fn reorder(&mut self, kind: EntityKind, from: usize, to: usize) {
        match kind {
            EntityKind::Column => array_move(&mut self.columns, from, to),
            EntityKind::Task => array_move(&mut self.tasks, from, to),
        }
    }

    /// Change a task's column without moving it in the sequence
    ///
    /// Returns false if the task does not exist.
    pub fn set_task_column(&mut self, task_id: &TaskId, column_id: &ColumnId) -> bool {
        match self.tasks.iter_mut().find(|t| &t.id == task_id) {
            Some(task) => {
                task.column_id = column_id.clone();
                true
            }
            None => false,
        }
    }

    /// Replace a column's title. Returns false if the column does not exist.
    pub fn relabel_column(&mut self, id: &ColumnId, title: impl Into<String>) -> bool {
        match self.columns.iter_mut().find(|c| &c.id == id) {
            Some(column) => {
                column.title = title.into();
                true
            }
            None => false,
        }
    }

    /// Replace a task's title and, when given, its description
    ///
    /// `description` of `Some("")` clears it. Returns false if the task does
    /// not exist.
    pub fn relabel_task(
        &mut self,
        id: &TaskId,
        title: Option<String>,
        description: Option<String>,
    ) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| &t.id == id) else {
            return false;
        };
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = description {
            task.description = if description.is_empty() {
                None
            } else {
                Some(description)
            };
        }
        true
    }
}

/// Remove the element at `from` and reinsert it at `to`
fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let len = items.len();
    assert!(
        from < len && to < len,
        "reorder out of range: from {from}, to {to}, len {len}"
    );
    if from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}
