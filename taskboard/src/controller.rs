//! BoardController - the single writer of board state
//!
//! The controller is what a renderer talks to. It owns the committed board,
//! the drag resolver, the focus navigator and the injected blob store, and
//! runs every call to completion before returning. Views read from the drag
//! preview while a drag is in progress so the board reflows live.

use crate::allocator::IdSequence;
use crate::drag::{DragOutcome, DragResolver};
use crate::error::{BoardError, Result};
use crate::focus::{ArrowKey, Cursor, FocusNavigator};
use crate::persistence::{
    load_board, load_sequence, save_board, save_sequence, BlobStore, LoadOptions,
};
use crate::store::BoardStore;
use crate::types::{Column, ColumnId, DragEvent, Entity, EntityRef, Gesture, Task, TaskId};
use tracing::{debug, info};

/// Composes store, drag resolver, focus navigator and persistence
pub struct BoardController<B: BlobStore> {
    committed: BoardStore,
    sequence: IdSequence,
    drag: DragResolver,
    focus: FocusNavigator,
    blobs: B,
}

impl<B: BlobStore> BoardController<B> {
    /// Load the board from `blobs` (seeding it on first run)
    pub fn open(mut blobs: B, options: LoadOptions) -> Result<Self> {
        let committed = load_board(&mut blobs, options)?;
        let sequence = load_sequence(&blobs)?;
        let mut controller = Self::with_board(blobs, committed);
        controller.sequence = sequence;
        Ok(controller)
    }

    /// Wrap an already loaded board. Nothing is written until the first change.
    pub fn with_board(blobs: B, board: BoardStore) -> Self {
        Self {
            committed: board,
            sequence: IdSequence::default(),
            drag: DragResolver::new(),
            focus: FocusNavigator::new(),
            blobs,
        }
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Board as it should be rendered right now
    pub fn board(&self) -> &BoardStore {
        self.drag.preview().unwrap_or(&self.committed)
    }

    /// Board as last committed, ignoring any drag preview
    pub fn committed(&self) -> &BoardStore {
        &self.committed
    }

    pub fn columns(&self) -> &[Column] {
        self.board().columns()
    }

    pub fn tasks(&self) -> &[Task] {
        self.board().tasks()
    }

    /// Tasks shown under one column
    pub fn tasks_in_column(&self, id: &ColumnId) -> Vec<&Task> {
        self.board().tasks_in_column(id).collect()
    }

    /// Entity being dragged, for the drag overlay
    pub fn active(&self) -> Option<&Entity> {
        self.drag.active()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn cursor(&self) -> Cursor {
        self.focus.cursor()
    }

    /// Entity that should carry input focus
    pub fn focused(&self) -> Option<EntityRef> {
        self.focus.focused(self.board())
    }

    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    // =========================================================================
    // Structural edits
    // =========================================================================

    /// Append a new column and return its id
    pub fn add_column(&mut self, title: &str) -> Result<ColumnId> {
        let title = non_blank(title)?;
        let id = self.sequence.next_column(self.committed.columns());
        let column = Column::new(id.clone(), title);

        self.edit(|board| board.insert_column(column.clone()));
        self.persist()?;
        info!(column = %id, "added column");
        Ok(id)
    }

    /// Delete a column and its tasks. Returns false if it did not exist.
    pub fn delete_column(&mut self, id: &ColumnId) -> Result<bool> {
        let removed = self.edit(|board| board.remove_column(id).is_some());
        if !removed {
            debug!(column = %id, "delete of absent column ignored");
            return Ok(false);
        }
        self.persist()?;
        info!(column = %id, "deleted column");
        Ok(true)
    }

    /// Append a task to a column and return its id
    pub fn add_task(
        &mut self,
        column_id: &ColumnId,
        title: &str,
        description: Option<&str>,
    ) -> Result<TaskId> {
        let title = non_blank(title)?;
        if self.committed.column(column_id).is_none() {
            return Err(BoardError::column_not_found(column_id.as_str()));
        }

        let id = self.sequence.next_task(self.committed.tasks());
        let mut task = Task::new(id.clone(), column_id.clone(), title);
        task.description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        self.edit(|board| board.insert_task(task.clone()));
        self.persist()?;
        info!(task = %id, column = %column_id, "added task");
        Ok(id)
    }

    /// Delete a task. Returns false if it did not exist.
    pub fn delete_task(&mut self, id: &TaskId) -> Result<bool> {
        let removed = self.edit(|board| board.remove_task(id).is_some());
        if !removed {
            debug!(task = %id, "delete of absent task ignored");
            return Ok(false);
        }
        self.persist()?;
        info!(task = %id, "deleted task");
        Ok(true)
    }

    /// Change a column's title
    pub fn rename_column(&mut self, id: &ColumnId, title: &str) -> Result<()> {
        let title = non_blank(title)?;
        if !self.edit(|board| board.relabel_column(id, title)) {
            return Err(BoardError::column_not_found(id.as_str()));
        }
        self.persist()
    }

    /// Change a task's title and/or description
    ///
    /// An empty description clears it.
    pub fn update_task(
        &mut self,
        id: &TaskId,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<()> {
        let title = title.map(non_blank).transpose()?.map(str::to_string);
        let description = description.map(|d| d.trim().to_string());
        if !self.edit(|board| board.relabel_task(id, title.clone(), description.clone())) {
            return Err(BoardError::task_not_found(id.as_str()));
        }
        self.persist()
    }

    // =========================================================================
    // Drag lifecycle
    // =========================================================================

    /// A drag began on `active`. Key navigation is suspended until it ends.
    pub fn drag_start(&mut self, active: &EntityRef) {
        self.drag.start(&self.committed, active);
        if self.drag.is_dragging() {
            self.focus.suppress();
        }
    }

    /// The pointer moved over a (possibly new) target
    pub fn drag_over(&mut self, event: &DragEvent) -> Option<DragOutcome> {
        self.drag.over(event)
    }

    /// The drag ended; commit and persist the result
    pub fn drag_end(&mut self, event: &DragEvent) -> Result<DragOutcome> {
        let before = self.committed.clone();
        let outcome = self.drag.end(&mut self.committed, event);
        if !self.drag.is_dragging() {
            self.focus.release();
            self.focus.reconcile(&self.committed);
        }

        if self.committed != before {
            self.persist()?;
        }
        Ok(outcome)
    }

    /// Dispatch one recorded gesture step
    pub fn apply_gesture(&mut self, gesture: &Gesture) -> Result<Option<DragOutcome>> {
        match gesture {
            Gesture::Start { active } => {
                self.drag_start(active);
                Ok(None)
            }
            Gesture::Over { active, over } => Ok(self.drag_over(&DragEvent {
                active: active.clone(),
                over: over.clone(),
            })),
            Gesture::End { active, over } => self
                .drag_end(&DragEvent {
                    active: active.clone(),
                    over: over.clone(),
                })
                .map(Some),
        }
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Move focus for one arrow key and return the newly focused entity
    pub fn handle_key(&mut self, key: ArrowKey) -> Option<EntityRef> {
        let board = self.drag.preview().unwrap_or(&self.committed);
        self.focus.handle_key(key, board);
        self.focused()
    }

    /// Like [`handle_key`](Self::handle_key) for a DOM-style key name.
    /// Keys other than the four arrows are ignored.
    pub fn handle_key_name(&mut self, name: &str) -> Option<EntityRef> {
        match ArrowKey::from_key_name(name) {
            Some(key) => self.handle_key(key),
            None => self.focused(),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Apply a structural edit to the committed board and, mid-drag, to the
    /// preview as well so the commit at drop does not resurrect it
    fn edit<T>(&mut self, mut f: impl FnMut(&mut BoardStore) -> T) -> T {
        let result = f(&mut self.committed);
        if let Some(preview) = self.drag.preview_mut() {
            f(preview);
        }
        self.focus.reconcile(self.drag.preview().unwrap_or(&self.committed));
        result
    }

    fn persist(&mut self) -> Result<()> {
        save_board(&mut self.blobs, &self.committed)?;
        save_sequence(&mut self.blobs, &self.sequence)
    }
}

fn non_blank(title: &str) -> Result<&str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        Err(BoardError::EmptyTitle)
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryBlobStore, COLUMNS_KEY, SEQUENCE_KEY, TASKS_KEY};

    fn controller() -> BoardController<MemoryBlobStore> {
        let board = BoardStore::from_parts(
            vec![Column::new("C1", "To Do"), Column::new("C3", "Done")],
            vec![Task::new("T1", "C1", "A"), Task::new("T2", "C1", "B")],
        );
        BoardController::with_board(MemoryBlobStore::new(), board)
    }

    #[test]
    fn test_add_column_allocates_past_max() {
        let mut ctl = controller();
        let id = ctl.add_column("Review").unwrap();
        assert_eq!(id.as_str(), "C4");
        assert_eq!(ctl.columns().last().unwrap().title, "Review");
        assert!(ctl.blobs().raw(COLUMNS_KEY).unwrap().contains("Review"));
    }

    #[test]
    fn test_deleted_ids_are_not_reused() {
        let mut ctl = controller();
        let t3 = ctl.add_task(&ColumnId::from("C1"), "C", None).unwrap();
        assert_eq!(t3.as_str(), "T3");
        ctl.delete_task(&t3).unwrap();
        assert_eq!(ctl.add_task(&ColumnId::from("C1"), "D", None).unwrap().as_str(), "T4");

        let c4 = ctl.add_column("Review").unwrap();
        ctl.delete_column(&c4).unwrap();
        assert_eq!(ctl.add_column("Later").unwrap().as_str(), "C5");
    }

    #[test]
    fn test_id_sequence_survives_reopen() {
        let mut ctl = controller();
        let t3 = ctl.add_task(&ColumnId::from("C1"), "C", None).unwrap();
        ctl.delete_task(&t3).unwrap();
        assert!(ctl.blobs().raw(SEQUENCE_KEY).is_some());

        let blobs = ctl.blobs().clone().with(crate::persistence::SEEDED_KEY, "true");
        let mut reopened = BoardController::open(blobs, LoadOptions::default()).unwrap();
        let id = reopened.add_task(&ColumnId::from("C1"), "D", None).unwrap();
        assert_eq!(id.as_str(), "T4");
    }

    #[test]
    fn test_blank_titles_rejected() {
        let mut ctl = controller();
        assert!(matches!(ctl.add_column("   "), Err(BoardError::EmptyTitle)));
        assert!(matches!(
            ctl.add_task(&ColumnId::from("C1"), "", None),
            Err(BoardError::EmptyTitle)
        ));
        assert_eq!(ctl.columns().len(), 2);
    }

    #[test]
    fn test_add_task_to_missing_column() {
        let mut ctl = controller();
        let err = ctl.add_task(&ColumnId::from("C9"), "x", None).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_add_task_trims_description() {
        let mut ctl = controller();
        let id = ctl
            .add_task(&ColumnId::from("C3"), " Ship it ", Some("  "))
            .unwrap();
        assert_eq!(id.as_str(), "T3");
        let task = ctl.board().task(&id).unwrap();
        assert_eq!(task.title, "Ship it");
        assert!(task.description.is_none());
    }

    #[test]
    fn test_delete_absent_ids_are_noops() {
        let mut ctl = controller();
        assert!(!ctl.delete_column(&ColumnId::from("C9")).unwrap());
        assert!(!ctl.delete_task(&TaskId::from("T9")).unwrap());
        assert!(ctl.blobs().raw(TASKS_KEY).is_none());
    }

    #[test]
    fn test_rename_and_update() {
        let mut ctl = controller();
        ctl.rename_column(&ColumnId::from("C3"), "Shipped").unwrap();
        assert_eq!(ctl.columns()[1].title, "Shipped");

        ctl.update_task(&TaskId::from("T2"), None, Some("notes"))
            .unwrap();
        assert_eq!(
            ctl.board().task(&TaskId::from("T2")).unwrap().description.as_deref(),
            Some("notes")
        );

        assert!(ctl
            .rename_column(&ColumnId::from("C9"), "x")
            .unwrap_err()
            .is_not_found());
        assert!(ctl
            .update_task(&TaskId::from("T9"), Some("x"), None)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_views_follow_preview_while_dragging() {
        let mut ctl = controller();
        ctl.drag_start(&EntityRef::task("T2"));
        assert!(ctl.is_dragging());
        assert_eq!(ctl.active().map(|e| e.title()), Some("B"));

        ctl.drag_over(&DragEvent::new(EntityRef::task("T2"), EntityRef::column("C3")));
        assert_eq!(ctl.tasks_in_column(&ColumnId::from("C3")).len(), 1);
        assert_eq!(ctl.committed().task_count(&ColumnId::from("C3")), 0);

        ctl.drag_end(&DragEvent::new(EntityRef::task("T2"), EntityRef::column("C3")))
            .unwrap();
        assert!(!ctl.is_dragging());
        assert!(ctl.active().is_none());
        assert_eq!(ctl.committed().task_count(&ColumnId::from("C3")), 1);
        assert!(ctl.blobs().raw(TASKS_KEY).unwrap().contains("\"columnId\":\"C3\""));
    }

    #[test]
    fn test_keys_ignored_during_drag() {
        let mut ctl = controller();
        ctl.drag_start(&EntityRef::column("C1"));
        assert_eq!(ctl.handle_key(ArrowKey::Right), None);
        ctl.drag_end(&DragEvent::outside(EntityRef::column("C1")))
            .unwrap();
        assert_eq!(ctl.handle_key(ArrowKey::Right), Some(EntityRef::column("C1")));
    }

    #[test]
    fn test_unknown_start_mid_drag_keeps_drag_and_focus_lock() {
        let mut ctl = controller();
        ctl.drag_start(&EntityRef::task("T1"));
        ctl.drag_over(&DragEvent::new(EntityRef::task("T1"), EntityRef::column("C3")));

        ctl.drag_start(&EntityRef::task("T99"));
        assert!(ctl.is_dragging());
        assert_eq!(ctl.handle_key(ArrowKey::Right), None);

        let outcome = ctl
            .drag_end(&DragEvent::outside(EntityRef::task("T1")))
            .unwrap();
        assert_eq!(outcome, DragOutcome::Cancelled);
        assert_eq!(
            ctl.committed().task(&TaskId::from("T1")).unwrap().column_id.as_str(),
            "C3"
        );
        assert_eq!(ctl.handle_key(ArrowKey::Right), Some(EntityRef::column("C1")));
    }

    #[test]
    fn test_unknown_start_while_idle_leaves_keys_working() {
        let mut ctl = controller();
        ctl.drag_start(&EntityRef::column("C9"));
        assert!(!ctl.is_dragging());
        assert_eq!(ctl.handle_key(ArrowKey::Right), Some(EntityRef::column("C1")));
    }

    #[test]
    fn test_end_for_other_entity_keeps_drag() {
        let mut ctl = controller();
        ctl.drag_start(&EntityRef::task("T1"));
        let outcome = ctl
            .drag_end(&DragEvent::new(EntityRef::task("T2"), EntityRef::task("T1")))
            .unwrap();
        assert_eq!(outcome, DragOutcome::Unchanged);
        assert!(ctl.is_dragging());
        assert!(ctl.blobs().raw(TASKS_KEY).is_none());
        assert_eq!(ctl.handle_key(ArrowKey::Right), None);
    }

    #[test]
    fn test_delete_during_drag_does_not_resurrect() {
        let mut ctl = controller();
        ctl.drag_start(&EntityRef::task("T1"));
        ctl.drag_over(&DragEvent::new(EntityRef::task("T1"), EntityRef::column("C3")));
        ctl.delete_task(&TaskId::from("T2")).unwrap();
        ctl.drag_end(&DragEvent::new(EntityRef::task("T1"), EntityRef::column("C3")))
            .unwrap();
        assert!(ctl.committed().task(&TaskId::from("T2")).is_none());
        assert_eq!(ctl.committed().tasks().len(), 1);
    }

    #[test]
    fn test_focus_reconciled_after_delete() {
        let mut ctl = controller();
        ctl.handle_key(ArrowKey::Right);
        ctl.handle_key(ArrowKey::Right);
        assert_eq!(ctl.focused(), Some(EntityRef::column("C3")));

        ctl.delete_column(&ColumnId::from("C3")).unwrap();
        assert_eq!(ctl.focused(), Some(EntityRef::column("C1")));
    }

    #[test]
    fn test_handle_key_name_ignores_other_keys() {
        let mut ctl = controller();
        assert_eq!(ctl.handle_key_name("Escape"), None);
        assert_eq!(ctl.handle_key_name("ArrowDown"), Some(EntityRef::column("C1")));
    }

    #[test]
    fn test_apply_gesture_stream() {
        let mut ctl = controller();
        let stream = [
            Gesture::Start {
                active: EntityRef::task("T2"),
            },
            Gesture::Over {
                active: EntityRef::task("T2"),
                over: Some(EntityRef::task("T1")),
            },
            Gesture::End {
                active: EntityRef::task("T2"),
                over: Some(EntityRef::task("T1")),
            },
        ];
        let mut last = None;
        for g in &stream {
            last = ctl.apply_gesture(g).unwrap();
        }
        assert_eq!(last, Some(DragOutcome::Committed));
        let ids: Vec<_> = ctl.tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["T2", "T1"]);
    }
}
