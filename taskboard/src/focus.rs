//! Keyboard focus navigation over the board grid.
//!
//! The cursor is a column index plus an optional task index within that
//! column's filtered task list. Every move saturates at the edges; nothing
//! wraps and no request is ever an error. The navigator only reports which
//! entity is focused. Applying the focus affordance is the renderer's job.

use crate::store::BoardStore;
use crate::types::EntityRef;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Directional keys the navigator reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

impl ArrowKey {
    /// Map a DOM-style key name (`ArrowUp`, ...) to a key. Anything else is
    /// not for the navigator and yields `None`.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Focus position: `(None, None)` means nothing is focused
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub column: Option<usize>,
    pub task: Option<usize>,
}

impl Cursor {
    pub const NONE: Cursor = Cursor {
        column: None,
        task: None,
    };

    pub fn on_column(column: usize) -> Self {
        Self {
            column: Some(column),
            task: None,
        }
    }

    pub fn on_task(column: usize, task: usize) -> Self {
        Self {
            column: Some(column),
            task: Some(task),
        }
    }
}

/// Keyboard cursor with drag suppression
#[derive(Debug, Clone, Default)]
pub struct FocusNavigator {
    cursor: Cursor,
    suppressed: bool,
}

impl FocusNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Ignore key input until [`release`](Self::release)
    pub fn suppress(&mut self) {
        self.suppressed = true;
    }

    pub fn release(&mut self) {
        self.suppressed = false;
    }

    /// Move the cursor for one key press. Returns true if it moved.
    pub fn handle_key(&mut self, key: ArrowKey, board: &BoardStore) -> bool {
        if self.suppressed {
            trace!(?key, "focus change suppressed during drag");
            return false;
        }

        let next = step(self.cursor, key, board);
        let changed = next != self.cursor;
        self.cursor = next;
        changed
    }

    /// Clamp the cursor back onto the board after columns or tasks changed
    pub fn reconcile(&mut self, board: &BoardStore) {
        let columns = board.columns();
        let Some(column) = self.cursor.column else {
            self.cursor = Cursor::NONE;
            return;
        };

        if columns.is_empty() {
            self.cursor = Cursor::NONE;
            return;
        }

        if column >= columns.len() {
            self.cursor = Cursor::on_column(columns.len() - 1);
            return;
        }

        if let Some(task) = self.cursor.task {
            let count = board.task_count(&columns[column].id);
            self.cursor.task = match count {
                0 => None,
                n if task >= n => Some(n - 1),
                _ => Some(task),
            };
        }
    }

    /// The entity under the cursor, if any
    pub fn focused(&self, board: &BoardStore) -> Option<EntityRef> {
        let column = board.columns().get(self.cursor.column?)?;
        match self.cursor.task {
            None => Some(EntityRef::Column(column.id.clone())),
            Some(task) => board
                .tasks_in_column(&column.id)
                .nth(task)
                .map(|t| EntityRef::Task(t.id.clone())),
        }
    }
}

/// Pure transition function for one key press
fn step(cursor: Cursor, key: ArrowKey, board: &BoardStore) -> Cursor {
    let column_count = board.columns().len();

    let Some(column) = cursor.column else {
        return if column_count > 0 {
            Cursor::on_column(0)
        } else {
            cursor
        };
    };

    let neighbour = |delta: isize| -> usize {
        match column.checked_add_signed(delta) {
            Some(c) if c < column_count => c,
            _ => column,
        }
    };

    let tasks_here = || {
        board
            .columns()
            .get(column)
            .map_or(0, |c| board.task_count(&c.id))
    };

    match (cursor.task, key) {
        (None, ArrowKey::Right) => Cursor::on_column(neighbour(1)),
        (None, ArrowKey::Left) => Cursor::on_column(neighbour(-1)),
        (None, ArrowKey::Down) => {
            if tasks_here() > 0 {
                Cursor::on_task(column, 0)
            } else {
                cursor
            }
        }
        (None, ArrowKey::Up) => cursor,
        (Some(task), ArrowKey::Down) => {
            if task + 1 < tasks_here() {
                Cursor::on_task(column, task + 1)
            } else {
                cursor
            }
        }
        (Some(task), ArrowKey::Up) => match task.checked_sub(1) {
            Some(prev) => Cursor::on_task(column, prev),
            None => cursor,
        },
        (Some(_), ArrowKey::Right) => Cursor::on_column(neighbour(1)),
        (Some(_), ArrowKey::Left) => Cursor::on_column(neighbour(-1)),
    }
}
