//! Gesture events delivered by the drag sensor layer.

use super::entity::EntityRef;
use serde::{Deserialize, Serialize};

/// An over or end event: the dragged entity and what it is currently over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragEvent {
    pub active: EntityRef,
    #[serde(default)]
    pub over: Option<EntityRef>,
}

impl DragEvent {
    /// Event with a resolved target
    pub fn new(active: EntityRef, over: EntityRef) -> Self {
        Self {
            active,
            over: Some(over),
        }
    }

    /// Event with no target under the pointer
    pub fn outside(active: EntityRef) -> Self {
        Self { active, over: None }
    }
}

/// One step of a drag lifecycle, as recorded or replayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum Gesture {
    Start {
        active: EntityRef,
    },
    Over {
        active: EntityRef,
        #[serde(default)]
        over: Option<EntityRef>,
    },
    End {
        active: EntityRef,
        #[serde(default)]
        over: Option<EntityRef>,
    },
}
