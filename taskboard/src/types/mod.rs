//! Core types for the task board

mod board;
mod entity;
mod event;
mod ids;
mod task;

// Re-export all types
pub use board::Column;
pub use entity::{Entity, EntityKind, EntityRef};
pub use event::{DragEvent, Gesture};
pub use ids::{ColumnId, TaskId};
pub use task::Task;
