//! Persistence boundary: opaque JSON blobs addressed by string keys.
//!
//! The engine never reaches for ambient storage. A [`BlobStore`] is handed to
//! the controller, which loads the board once and saves both sequences after
//! every committed change.
//!
//! ## Keys
//!
//! ```text
//! columns   # JSON array of { id, title }
//! tasks     # JSON array of { id, title, columnId, description? }
//! sequence  # { column, task } high-water marks of the id allocator
//! seeded    # first-run marker; present once the demo board was written
//! ```
//!
//! Data written by the browser build marks its first run with
//! `alreadyLoggedIn` instead of `seeded`. Either marker suppresses seeding.
//!
//! A blob that fails to parse is logged and treated as absent. That is a
//! recovery, not an error: the board comes up empty for that sequence.

use crate::allocator::IdSequence;
use crate::error::{BoardError, Result};
use crate::store::BoardStore;
use crate::types::{Column, Task};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Key holding the column sequence
pub const COLUMNS_KEY: &str = "columns";
/// Key holding the task sequence
pub const TASKS_KEY: &str = "tasks";
/// Key holding the id allocator's high-water marks
pub const SEQUENCE_KEY: &str = "sequence";
/// Key marking that first-run seeding already happened
pub const SEEDED_KEY: &str = "seeded";
/// First-run marker written by the browser build
pub const LEGACY_SEEDED_KEY: &str = "alreadyLoggedIn";

/// Key-value storage for string blobs
pub trait BlobStore {
    /// Read a blob, `None` if the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a blob, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<B: BlobStore + ?Sized> BlobStore for Box<B> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// In-memory blob store for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.blobs.insert(key.into(), value.into());
        self
    }

    /// Raw view of a key
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Blob store backed by one `<key>.json` file per key in a directory
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the file holding `key`
    pub fn blob_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(BoardError::storage(key, "invalid key"));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.blob_path(key)?;
        atomic_write(&path, value.as_bytes())
    }
}

/// Atomic write via temp file and rename
fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Options for [`load_board`]
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Write the demonstration board on first run
    pub seed_demo_board: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            seed_demo_board: true,
        }
    }
}

/// The board written on first run
pub fn demo_board() -> BoardStore {
    BoardStore::from_parts(
        vec![
            Column::new("C7", "📋 To Do"),
            Column::new("C5", "🔘 In Progress"),
            Column::new("C6", "✔️ Completed"),
        ],
        vec![
            Task::new("T5", "C6", "Sketch"),
            Task::new("T1", "C6", "Make Breakfast"),
            Task::new("T3", "C7", "Fix lighting in the room"),
            Task::new("T6", "C5", "College project"),
            Task::new("T4", "C5", "Prepare for exam"),
        ],
    )
}

/// Load the board from `blobs`, seeding the demo board on first run
pub fn load_board<B: BlobStore + ?Sized>(blobs: &mut B, options: LoadOptions) -> Result<BoardStore> {
    if options.seed_demo_board && !already_seeded(blobs)? {
        let board = demo_board();
        save_board(blobs, &board)?;
        blobs.set(SEEDED_KEY, "true")?;
        info!("seeded demonstration board");
        return Ok(board);
    }

    let columns: Vec<Column> = read_sequence(blobs, COLUMNS_KEY)?;
    let tasks: Vec<Task> = read_sequence(blobs, TASKS_KEY)?;
    let board = BoardStore::from_parts(columns, tasks);

    let orphans = board.orphaned_tasks().count();
    if orphans > 0 {
        warn!(orphans, "loaded tasks referencing missing columns; they will not be shown");
    }
    debug!(
        columns = board.columns().len(),
        tasks = board.tasks().len(),
        "loaded board"
    );
    Ok(board)
}

/// Save both sequences
pub fn save_board<B: BlobStore + ?Sized>(blobs: &mut B, board: &BoardStore) -> Result<()> {
    blobs.set(COLUMNS_KEY, &serde_json::to_string(board.columns())?)?;
    blobs.set(TASKS_KEY, &serde_json::to_string(board.tasks())?)?;
    Ok(())
}

/// Load the allocator's high-water marks; missing or malformed yields zeros
pub fn load_sequence<B: BlobStore + ?Sized>(blobs: &B) -> Result<IdSequence> {
    let Some(raw) = blobs.get(SEQUENCE_KEY)? else {
        return Ok(IdSequence::default());
    };
    match serde_json::from_str(&raw) {
        Ok(sequence) => Ok(sequence),
        Err(e) => {
            warn!(key = SEQUENCE_KEY, error = %e, "malformed id sequence, rebuilding from ids");
            Ok(IdSequence::default())
        }
    }
}

/// Save the allocator's high-water marks
pub fn save_sequence<B: BlobStore + ?Sized>(blobs: &mut B, sequence: &IdSequence) -> Result<()> {
    blobs.set(SEQUENCE_KEY, &serde_json::to_string(sequence)?)
}

fn already_seeded<B: BlobStore + ?Sized>(blobs: &B) -> Result<bool> {
    for key in [SEEDED_KEY, LEGACY_SEEDED_KEY] {
        if blobs.get(key)?.is_some() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Read one JSON array; missing or malformed yields an empty sequence
fn read_sequence<B, T>(blobs: &B, key: &str) -> Result<Vec<T>>
where
    B: BlobStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = blobs.get(key)? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str(&raw) {
        Ok(items) => Ok(items),
        Err(e) => {
            warn!(key, error = %e, "malformed persisted state, falling back to empty");
            Ok(Vec::new())
        }
    }
}
