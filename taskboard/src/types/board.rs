//! Board-level types: Column

use super::ids::ColumnId;
use serde::{Deserialize, Serialize};

/// A column is a named, ordered bucket of tasks
///
/// The position of a column in the board's column sequence is its display
/// and drag order; the column itself carries no ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
}

impl Column {
    /// Create a new column
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_serialization() {
        let column = Column::new("C7", "To Do");
        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "C7", "title": "To Do" }));

        let parsed: Column = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, column);
    }
}
