//! Board rendering for the terminal.
//!
//! One table column per board column, tasks listed underneath in
//! within-column order. Tasks whose column is missing are not shown.

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use taskboard::{BoardStore, DragOutcome, EntityRef};

/// Create a table with the house style
pub fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Render the board as a table, or a hint when there are no columns
pub fn board_table(board: &BoardStore) -> String {
    if board.columns().is_empty() {
        return "No columns. Add one with `taskboard add-column <title>`.".to_string();
    }

    let mut table = new_table();
    table.set_header(
        board
            .columns()
            .iter()
            .map(|c| Cell::new(format!("{} ({})", c.title, c.id))),
    );

    let lanes: Vec<Vec<String>> = board
        .columns()
        .iter()
        .map(|c| {
            board
                .tasks_in_column(&c.id)
                .map(|t| format!("{} {}", t.id, t.title))
                .collect()
        })
        .collect();

    let depth = lanes.iter().map(Vec::len).max().unwrap_or(0);
    for row in 0..depth {
        table.add_row(
            lanes
                .iter()
                .map(|lane| Cell::new(lane.get(row).map(String::as_str).unwrap_or(""))),
        );
    }

    table.to_string()
}

/// Render the board as pretty JSON in the persisted shape
pub fn board_json(board: &BoardStore) -> serde_json::Result<String> {
    serde_json::to_string_pretty(board)
}

/// One-line summary of a drag result
pub fn describe_outcome(outcome: &DragOutcome) -> String {
    match outcome {
        DragOutcome::Cancelled => "Dropped outside any target".to_string(),
        DragOutcome::Unchanged => "Nothing changed".to_string(),
        DragOutcome::Committed => "Committed".to_string(),
        DragOutcome::ColumnMoved { from, to } => format!("Moved column from {from} to {to}"),
        DragOutcome::TaskMoved { from, to, column } => {
            format!("Moved task from {from} to {to} in {column}")
        }
        DragOutcome::TaskReassigned { column } => format!("Moved task to {column}"),
    }
}

/// Describe the focused entity, with its title when it still exists
pub fn describe_focus(board: &BoardStore, focused: Option<&EntityRef>) -> String {
    let Some(entity) = focused else {
        return "Nothing focused".to_string();
    };
    let title = match entity {
        EntityRef::Column(id) => board.column(id).map(|c| c.title.as_str()),
        EntityRef::Task(id) => board.task(id).map(|t| t.title.as_str()),
    };
    match title {
        Some(title) => format!("{entity}: {title}"),
        None => entity.to_string(),
    }
}
