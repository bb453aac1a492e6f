//! Taskboard CLI - a kanban board of ordered columns and draggable tasks.
//!
//! Commands:
//! - `taskboard show`: Print the board
//! - `taskboard add-column <title>`: Append a column
//! - `taskboard add-task <column> <title>`: Append a task to a column
//! - `taskboard rename-column <id> <title>`: Rename a column
//! - `taskboard edit-task <id>`: Change a task's title or description
//! - `taskboard delete-column <id>`: Delete a column and its tasks
//! - `taskboard delete-task <id>`: Delete a task
//! - `taskboard drag <active> [over]`: Drag and drop a column or task
//! - `taskboard replay <file>`: Replay a recorded gesture stream
//! - `taskboard navigate <key>...`: Walk the focus grid with arrow keys
//!
//! Environment variables:
//! - TASKBOARD_DATA_DIR: Override the data directory
//! - TASKBOARD_SEED_DEMO_BOARD: Seed the demonstration board on first run
//! - TASKBOARD_JSON: Print JSON instead of tables
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use taskboard::{BoardController, FileBlobStore, LoadOptions};
use taskboard_cli::{config, execute, Cli, Format};

/// Load config, open the board and run the command.
fn run(cli: Cli) -> anyhow::Result<String> {
    let mut config = config::load()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let format = if cli.json || config.json {
        Format::Json
    } else {
        Format::Table
    };
    debug!(data_dir = %config.data_dir.display(), "opening board");

    let mut board = BoardController::open(
        FileBlobStore::new(&config.data_dir),
        LoadOptions {
            seed_demo_board: config.seed_demo_board,
        },
    )?;
    execute(cli.command, &mut board, format)
}

/// Print the result and map errors to exit codes.
fn handle_result(result: anyhow::Result<String>) -> i32 {
    match result {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing with appropriate level
    let filter = if cli.debug {
        EnvFilter::new("taskboard=debug,taskboard_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = handle_result(run(cli));
    std::process::exit(exit_code);
}
