//! Entity references and snapshots shared by drag and focus handling.

use super::board::Column;
use super::ids::{ColumnId, TaskId};
use super::task::Task;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of the two entity kinds on a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Column,
    Task,
}

impl EntityKind {
    /// Stable lowercase name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Column => "column",
            Self::Task => "task",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed reference to a column or task by id
///
/// On the wire this is `{ "kind": "column" | "task", "id": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum EntityRef {
    Column(ColumnId),
    Task(TaskId),
}

impl EntityRef {
    /// Reference a column
    pub fn column(id: impl Into<ColumnId>) -> Self {
        Self::Column(id.into())
    }

    /// Reference a task
    pub fn task(id: impl Into<TaskId>) -> Self {
        Self::Task(id.into())
    }

    /// Infer the kind from the id prefix (`C...` or `T...`)
    pub fn parse(id: &str) -> Option<Self> {
        if id.starts_with(ColumnId::PREFIX) {
            Some(Self::column(id))
        } else if id.starts_with(TaskId::PREFIX) {
            Some(Self::task(id))
        } else {
            None
        }
    }

    /// Kind of the referenced entity
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Column(_) => EntityKind::Column,
            Self::Task(_) => EntityKind::Task,
        }
    }

    /// Raw id string
    pub fn id(&self) -> &str {
        match self {
            Self::Column(id) => id.as_str(),
            Self::Task(id) => id.as_str(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}

/// Owned snapshot of a column or task, used for the drag preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entity {
    Column(Column),
    Task(Task),
}

impl Entity {
    /// Reference to this entity
    pub fn to_ref(&self) -> EntityRef {
        match self {
            Self::Column(c) => EntityRef::Column(c.id.clone()),
            Self::Task(t) => EntityRef::Task(t.id.clone()),
        }
    }

    /// Display title
    pub fn title(&self) -> &str {
        match self {
            Self::Column(c) => &c.title,
            Self::Task(t) => &t.title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ref_wire_shape() {
        let r = EntityRef::task("T2");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "task", "id": "T2" }));

        let parsed: EntityRef =
            serde_json::from_value(serde_json::json!({ "kind": "column", "id": "C1" })).unwrap();
        assert_eq!(parsed, EntityRef::column("C1"));
    }

    #[test]
    fn test_entity_ref_rejects_unknown_kind() {
        let parsed: Result<EntityRef, _> =
            serde_json::from_value(serde_json::json!({ "kind": "swimlane", "id": "S1" }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_parse_by_prefix() {
        assert_eq!(EntityRef::parse("C3"), Some(EntityRef::column("C3")));
        assert_eq!(EntityRef::parse("T10"), Some(EntityRef::task("T10")));
        assert_eq!(EntityRef::parse("X1"), None);
    }

    #[test]
    fn test_entity_to_ref() {
        let e = Entity::Task(Task::new("T1", "C1", "A"));
        assert_eq!(e.to_ref(), EntityRef::task("T1"));
        assert_eq!(e.title(), "A");
        assert_eq!(e.to_ref().kind(), EntityKind::Task);
    }
}
