//! Kanban board engine: ordered columns, draggable tasks, keyboard focus
//!
//! This crate holds the state model and transition rules behind an interactive
//! task board. It renders nothing itself. A renderer feeds it gestures and key
//! presses through a [`BoardController`] and reads back the board to draw.
//!
//! ## Overview
//!
//! - **Two flat sequences** - Columns in display order, tasks in one global order
//! - **Membership by reference** - A task belongs to the column its `column_id` names
//! - **Live drag preview** - Over events reflow a preview; the drop commits it
//! - **Saturating focus** - Arrow keys walk a column/task grid and stop at the edges
//! - **Injected storage** - Two JSON blobs behind a [`BlobStore`]
//!
//! ## Basic Usage
//!
//! ```rust
//! use taskboard::{BoardController, DragEvent, EntityRef, LoadOptions, MemoryBlobStore};
//!
//! # fn example() -> taskboard::Result<()> {
//! let mut board = BoardController::open(MemoryBlobStore::new(), LoadOptions::default())?;
//!
//! let todo = board.add_column("To Do")?;
//! let task = board.add_task(&todo, "Write docs", None)?;
//!
//! let active = EntityRef::Task(task);
//! board.drag_start(&active);
//! board.drag_over(&DragEvent::new(active.clone(), EntityRef::Column(todo.clone())));
//! board.drag_end(&DragEvent::new(active, EntityRef::Column(todo)))?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Storage Layout
//!
//! ```text
//! columns   # [{"id":"C1","title":"To Do"}]
//! tasks     # [{"id":"T1","title":"Write docs","columnId":"C1"}]
//! sequence  # {"column":1,"task":1}
//! seeded    # first-run marker
//! ```

pub mod allocator;
pub mod controller;
pub mod drag;
mod error;
pub mod focus;
pub mod persistence;
pub mod store;
pub mod types;

pub use allocator::IdSequence;
pub use controller::BoardController;
pub use drag::{DragOutcome, DragResolver};
pub use error::{BoardError, Result};
pub use focus::{ArrowKey, Cursor, FocusNavigator};
pub use persistence::{
    demo_board, load_board, save_board, BlobStore, FileBlobStore, LoadOptions, MemoryBlobStore,
};
pub use store::BoardStore;

// Re-export commonly used types
pub use types::{
    Column, ColumnId, DragEvent, Entity, EntityKind, EntityRef, Gesture, Task, TaskId,
};
