//! Drag transition resolver
//!
//! A drag runs `Idle -> Dragging -> Idle`. While dragging, over events are
//! applied to a preview copy of the board so the renderer can reflow live;
//! the committed board is only touched when the drag ends, at which point the
//! preview is folded in and the end rules are applied on top.
//!
//! # Rules
//!
//! | active | over   | over phase                          | end phase                  |
//! |--------|--------|-------------------------------------|----------------------------|
//! | task   | task   | move to over's index, adopt column  | same, unless already applied |
//! | task   | column | adopt column, keep index            | same                       |
//! | column | column | nothing                             | move to over's index       |
//! | column | task   | nothing                             | nothing                    |
//! | any    | none   | nothing                             | commit preview as-is       |
//!
//! An end event whose target was the last target handled by the over phase
//! does not re-apply the move. Applying it again would undo it, because the
//! over task has already shifted one slot.
//!
//! Stray events never end a drag early. A start for an unknown entity and an
//! end naming a different active entity are ignored, and the session stays.

use crate::store::BoardStore;
use crate::types::{ColumnId, DragEvent, Entity, EntityKind, EntityRef};
use tracing::debug;

/// What a drag step did to the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Dropped outside any target; the last preview was committed
    Cancelled,
    /// Nothing applicable (same index, unknown id, column over task)
    Unchanged,
    /// The over phase already placed the entity; the preview was committed
    Committed,
    /// A column moved within the column sequence
    ColumnMoved { from: usize, to: usize },
    /// A task moved within the task sequence and now belongs to `column`
    TaskMoved {
        from: usize,
        to: usize,
        column: ColumnId,
    },
    /// A task changed column without moving in the sequence
    TaskReassigned { column: ColumnId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Over,
    End,
}

/// State of an in-progress drag
#[derive(Debug, Clone)]
struct DragSession {
    active: Entity,
    preview: BoardStore,
    last_over: Option<Option<EntityRef>>,
}

/// Resolves drag lifecycle events into board mutations
#[derive(Debug, Clone, Default)]
pub struct DragResolver {
    session: Option<DragSession>,
}

impl DragResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Snapshot of the entity being dragged
    pub fn active(&self) -> Option<&Entity> {
        self.session.as_ref().map(|s| &s.active)
    }

    /// Live board state while dragging
    pub fn preview(&self) -> Option<&BoardStore> {
        self.session.as_ref().map(|s| &s.preview)
    }

    /// Mutable preview, for structural edits that arrive mid-drag
    pub(crate) fn preview_mut(&mut self) -> Option<&mut BoardStore> {
        self.session.as_mut().map(|s| &mut s.preview)
    }

    /// Begin a drag of `active`
    ///
    /// Returns false if the entity does not exist; any drag already in
    /// progress carries on untouched. Starting a known entity while already
    /// dragging discards the old preview.
    pub fn start(&mut self, committed: &BoardStore, active: &EntityRef) -> bool {
        let snapshot = match active {
            EntityRef::Column(id) => committed.column(id).cloned().map(Entity::Column),
            EntityRef::Task(id) => committed.task(id).cloned().map(Entity::Task),
        };

        let Some(snapshot) = snapshot else {
            debug!(active = %active, "drag start for unknown entity ignored");
            return false;
        };

        if self.session.is_some() {
            debug!(active = %active, "drag restarted");
        }
        debug!(active = %active, "drag start");
        self.session = Some(DragSession {
            active: snapshot,
            preview: committed.clone(),
            last_over: None,
        });
        true
    }

    /// Apply an over event to the preview
    ///
    /// Returns the live change, if any. Events outside a drag, for a
    /// different active entity, or repeating the previous target are ignored.
    pub fn over(&mut self, event: &DragEvent) -> Option<DragOutcome> {
        let session = self.session.as_mut()?;

        if session.active.to_ref() != event.active {
            debug!(active = %event.active, "over event for a different active entity ignored");
            return None;
        }

        // Column drags only resolve at drop
        if event.active.kind() == EntityKind::Column {
            return None;
        }

        if session.last_over.as_ref() == Some(&event.over) {
            return None;
        }
        session.last_over = Some(event.over.clone());

        let over = event.over.as_ref()?;
        let outcome = apply_rule(&mut session.preview, &event.active, over, Phase::Over);
        if let Some(ref outcome) = outcome {
            debug!(active = %event.active, over = %over, ?outcome, "drag over");
        }
        outcome
    }

    /// Finish the drag and commit the result into `committed`
    ///
    /// Returns the resolver to idle. Without a preceding start the end rules
    /// apply directly to `committed`. An end for a different active entity
    /// than the one being dragged is ignored and the drag continues.
    pub fn end(&mut self, committed: &mut BoardStore, event: &DragEvent) -> DragOutcome {
        if let Some(session) = &self.session {
            if session.active.to_ref() != event.active {
                debug!(active = %event.active, "end event for a different active entity ignored");
                return DragOutcome::Unchanged;
            }
        }
        let session = self.session.take();

        let already_applied = session.as_ref().is_some_and(|s| {
            event.active.kind() == EntityKind::Task && s.last_over.as_ref() == Some(&event.over)
        });

        if let Some(session) = session {
            *committed = session.preview;
        }

        let Some(over) = event.over.as_ref() else {
            debug!(active = %event.active, "drag cancelled");
            return DragOutcome::Cancelled;
        };

        if already_applied {
            debug!(active = %event.active, over = %over, "drag end committed preview");
            return DragOutcome::Committed;
        }

        let outcome = apply_rule(committed, &event.active, over, Phase::End)
            .unwrap_or(DragOutcome::Unchanged);
        debug!(active = %event.active, over = %over, ?outcome, "drag end");
        outcome
    }
}

/// Apply one rule of the table in the module docs
fn apply_rule(
    store: &mut BoardStore,
    active: &EntityRef,
    over: &EntityRef,
    phase: Phase,
) -> Option<DragOutcome> {
    match (active, over) {
        (EntityRef::Task(active_id), EntityRef::Task(over_id)) => {
            let from = store.task_index(active_id)?;
            let to = store.task_index(over_id)?;
            if from == to {
                return None;
            }
            let column = store.tasks()[to].column_id.clone();
            store.reorder(EntityKind::Task, from, to);
            store.set_task_column(active_id, &column);
            Some(DragOutcome::TaskMoved { from, to, column })
        }
        (EntityRef::Task(active_id), EntityRef::Column(column)) => {
            store.column(column)?;
            let current = &store.task(active_id)?.column_id;
            if current == column {
                return None;
            }
            store.set_task_column(active_id, column);
            Some(DragOutcome::TaskReassigned {
                column: column.clone(),
            })
        }
        (EntityRef::Column(active_id), EntityRef::Column(over_id)) if phase == Phase::End => {
            let from = store.column_index(active_id)?;
            let to = store.column_index(over_id)?;
            if from == to {
                return None;
            }
            store.reorder(EntityKind::Column, from, to);
            Some(DragOutcome::ColumnMoved { from, to })
        }
        (EntityRef::Column(_), _) => None,
    }
}
