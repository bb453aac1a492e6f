//! Task type

use super::ids::{ColumnId, TaskId};
use serde::{Deserialize, Serialize};

/// A titled unit of work bound to exactly one column
///
/// Within-column order is not stored on the task. It is the order of the
/// board's global task sequence filtered by `column_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub column_id: ColumnId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Task {
    /// Create a new task in the given column
    pub fn new(
        id: impl Into<TaskId>,
        column_id: impl Into<ColumnId>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            column_id: column_id.into(),
            description: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_wire_shape() {
        let task = Task::new("T1", "C6", "Make Breakfast");
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": "T1", "title": "Make Breakfast", "columnId": "C6" })
        );
    }

    #[test]
    fn test_task_with_description() {
        let task = Task::new("T2", "C1", "Sketch").with_description("pencil only");
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"description\":\"pencil only\""));

        let parsed: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.description.as_deref(), Some("pencil only"));
    }

    #[test]
    fn test_task_missing_description_defaults() {
        let parsed: Task =
            serde_json::from_str(r#"{"id":"T3","title":"x","columnId":"C1"}"#).unwrap();
        assert!(parsed.description.is_none());
    }
}
