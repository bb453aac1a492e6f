//! CLI definition for the taskboard command-line interface.
//!
//! This module only depends on `clap` and `std`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Taskboard - a kanban board of ordered columns and draggable tasks.
///
/// Every command loads the board from the data directory, applies one
/// operation through the board controller and saves the result.
#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(version)]
#[command(about = "Kanban board of ordered columns and draggable tasks")]
#[command(
    long_about = "Taskboard keeps a kanban board of ordered columns and tasks on disk and \
    applies drag gestures and keyboard navigation to it.\n\n\
    Configuration is read from ~/.config/taskboard/config.toml and ./taskboard.toml.\n\n\
    Environment variables:\n  \
    TASKBOARD_DATA_DIR         Directory holding columns.json and tasks.json\n  \
    TASKBOARD_SEED_DEMO_BOARD  Write the demonstration board on first run (default true)\n  \
    TASKBOARD_JSON             Print JSON instead of tables"
)]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Directory holding the board data (overrides configuration)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the board
    Show,

    /// Append a column
    AddColumn {
        /// Column title
        title: String,
    },

    /// Append a task to a column
    AddTask {
        /// Column id (e.g. C1)
        column: String,
        /// Task title
        title: String,
        /// Optional description
        #[arg(long)]
        description: Option<String>,
    },

    /// Rename a column
    RenameColumn {
        /// Column id
        id: String,
        /// New title
        title: String,
    },

    /// Edit a task's title or description
    EditTask {
        /// Task id (e.g. T1)
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description (empty clears it)
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a column and every task in it
    DeleteColumn {
        /// Column id
        id: String,
    },

    /// Delete a task
    DeleteTask {
        /// Task id
        id: String,
    },

    /// Drag an entity over another and drop it there
    ///
    /// Kinds are inferred from the id prefix. Without a target the drag is
    /// dropped outside any target.
    Drag {
        /// Id of the dragged column or task
        active: String,
        /// Id of the column or task to drop on
        over: Option<String>,
    },

    /// Replay a recorded gesture stream (JSON array of start/over/end steps)
    Replay {
        /// Path to the gesture file
        file: PathBuf,
    },

    /// Press arrow keys and print the focused entity
    Navigate {
        /// Key names: ArrowUp, ArrowDown, ArrowLeft, ArrowRight (or up/down/left/right)
        #[arg(required = true)]
        keys: Vec<String>,
    },
}
