//! Command execution against a board controller.
//!
//! Each command returns the text to print so it can be tested without a
//! process boundary.

use std::fs;

use anyhow::{bail, Context};
use taskboard::{
    BlobStore, BoardController, ColumnId, DragEvent, EntityRef, Gesture, TaskId,
};
use tracing::warn;

use crate::cli::Commands;
use crate::render::{board_json, board_table, describe_focus, describe_outcome};

/// Output format for commands that print the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Table,
    Json,
}

/// Run one command and return its output
pub fn execute<B: BlobStore>(
    command: Commands,
    board: &mut BoardController<B>,
    format: Format,
) -> anyhow::Result<String> {
    match command {
        Commands::Show => show(board, format),

        Commands::AddColumn { title } => {
            let id = board.add_column(&title)?;
            Ok(format!("Added column {id}"))
        }

        Commands::AddTask {
            column,
            title,
            description,
        } => {
            let id = board.add_task(&ColumnId::from(column), &title, description.as_deref())?;
            Ok(format!("Added task {id}"))
        }

        Commands::RenameColumn { id, title } => {
            board.rename_column(&ColumnId::from(id.as_str()), &title)?;
            Ok(format!("Renamed column {id}"))
        }

        Commands::EditTask {
            id,
            title,
            description,
        } => {
            if title.is_none() && description.is_none() {
                bail!("nothing to change: pass --title and/or --description");
            }
            board.update_task(
                &TaskId::from(id.as_str()),
                title.as_deref(),
                description.as_deref(),
            )?;
            Ok(format!("Updated task {id}"))
        }

        Commands::DeleteColumn { id } => {
            if board.delete_column(&ColumnId::from(id.as_str()))? {
                Ok(format!("Deleted column {id}"))
            } else {
                Ok(format!("No column {id}"))
            }
        }

        Commands::DeleteTask { id } => {
            if board.delete_task(&TaskId::from(id.as_str()))? {
                Ok(format!("Deleted task {id}"))
            } else {
                Ok(format!("No task {id}"))
            }
        }

        Commands::Drag { active, over } => {
            let active = parse_entity(&active)?;
            let over = over.as_deref().map(parse_entity).transpose()?;
            let event = DragEvent {
                active: active.clone(),
                over,
            };

            board.drag_start(&active);
            board.drag_over(&event);
            let outcome = board.drag_end(&event)?;
            Ok(describe_outcome(&outcome))
        }

        Commands::Replay { file } => {
            let raw = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let gestures: Vec<Gesture> = serde_json::from_str(&raw)
                .with_context(|| format!("invalid gesture stream in {}", file.display()))?;

            let mut lines = Vec::new();
            for gesture in &gestures {
                if let Some(outcome) = board.apply_gesture(gesture)? {
                    lines.push(describe_outcome(&outcome));
                }
            }
            if board.is_dragging() {
                warn!("gesture stream ended mid-drag; the preview was not committed");
            }
            lines.push(format!("Replayed {} gestures", gestures.len()));
            Ok(lines.join("\n"))
        }

        Commands::Navigate { keys } => {
            for key in &keys {
                let name = key_name(key);
                if taskboard::ArrowKey::from_key_name(name).is_none() {
                    warn!(key = %key, "ignoring unknown key");
                }
                board.handle_key_name(name);
            }
            let focused = board.focused();
            Ok(describe_focus(board.board(), focused.as_ref()))
        }
    }
}

fn show<B: BlobStore>(board: &BoardController<B>, format: Format) -> anyhow::Result<String> {
    match format {
        Format::Json => Ok(board_json(board.board())?),
        Format::Table => Ok(board_table(board.board())),
    }
}

/// Resolve an id like `C3` or `T7` to a typed reference
pub fn parse_entity(id: &str) -> anyhow::Result<EntityRef> {
    match EntityRef::parse(id) {
        Some(entity) => Ok(entity),
        None => bail!("'{id}' is neither a column id (C...) nor a task id (T...)"),
    }
}

/// Accept `up`/`down`/`left`/`right` as shorthand for the DOM key names
fn key_name(key: &str) -> &str {
    match key.to_ascii_lowercase().as_str() {
        "up" => "ArrowUp",
        "down" => "ArrowDown",
        "left" => "ArrowLeft",
        "right" => "ArrowRight",
        _ => key,
    }
}
