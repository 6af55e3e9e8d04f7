#![forbid(unsafe_code)]

//! Item-order persistence.
//!
//! The engine talks to storage through the [`KeyValueStore`] port:
//! `get(key)` and `set(key, value)` over strings. Two backends ship
//! here — [`MemoryStore`] for tests and ephemeral use, [`FileStore`]
//! for a JSON file with atomic write-rename — and hosts may bring
//! their own (browser local storage, a settings service).
//!
//! Persistence is best-effort, never a correctness dependency: every
//! failure is caught at the [`PersistenceAdapter`] boundary, logged as
//! a warning, and the reorder flow proceeds as if persistence were
//! disabled for that operation.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `StorageError::Io` | File I/O failure | Logged, operation skipped |
//! | `StorageError::Serialization` | JSON encode/decode | Logged, operation skipped |
//! | `StorageError::Unavailable` | Backend missing/denied | Logged, operation skipped |
//! | Format version mismatch | Older/newer writer | Saved order ignored |

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors from storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error during file operations.
    Io(std::io::Error),
    /// Serialization or deserialization error.
    Serialization(String),
    /// Backend is not available.
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {e}"),
            StorageError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            StorageError::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Serialization(_) | StorageError::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// ---------------------------------------------------------------------------
// Key-value port
// ---------------------------------------------------------------------------

/// The key-value persistence port.
pub trait KeyValueStore {
    /// Human-readable backend name for logging.
    fn name(&self) -> &str;

    /// Read the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

// ---------------------------------------------------------------------------
// Memory store
// ---------------------------------------------------------------------------

/// In-memory backend for tests and ephemeral state. Lost at process
/// exit.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: HashMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        "MemoryStore"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File store
// ---------------------------------------------------------------------------

/// JSON file contents for [`FileStore`].
#[derive(Serialize, Deserialize)]
struct StoreFile {
    /// Format version for future migrations.
    format_version: u32,
    /// Stored key-value pairs.
    entries: HashMap<String, String>,
}

impl StoreFile {
    const FORMAT_VERSION: u32 = 1;

    fn new() -> Self {
        Self {
            format_version: Self::FORMAT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// File-backed key-value store using a single JSON file.
///
/// Writes use a temporary file + rename so a crash mid-write can never
/// leave a half-written store behind:
/// 1. Write to `{path}.tmp`
/// 2. Flush and sync
/// 3. Rename `{path}.tmp` -> `{path}`
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store backed by the given path. The file is created on first
    /// save.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone();
        tmp.set_extension("json.tmp");
        tmp
    }

    fn read_file(&self) -> StorageResult<StoreFile> {
        if !self.path.exists() {
            // First run, nothing stored yet.
            return Ok(StoreFile::new());
        }
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let store: StoreFile = serde_json::from_reader(reader)
            .map_err(|e| StorageError::Serialization(format!("failed to parse store file: {e}")))?;
        if store.format_version != StoreFile::FORMAT_VERSION {
            tracing::warn!(
                stored = store.format_version,
                expected = StoreFile::FORMAT_VERSION,
                "store file format version mismatch, ignoring stored entries"
            );
            return Ok(StoreFile::new());
        }
        Ok(store)
    }

    fn write_file(&self, store: &StoreFile) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = self.temp_path();
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, store)
                .map_err(|e| StorageError::Serialization(format!("failed to serialize: {e}")))?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn name(&self) -> &str {
        "FileStore"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.read_file()?.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        // An unreadable store file is replaced wholesale; only I/O
        // errors abort the write.
        let mut store = match self.read_file() {
            Ok(store) => store,
            Err(StorageError::Serialization(e)) => {
                tracing::warn!(error = %e, "replacing unreadable store file");
                StoreFile::new()
            }
            Err(e) => return Err(e),
        };
        store.entries.insert(key.to_string(), value.to_string());
        self.write_file(&store)
    }
}

// ---------------------------------------------------------------------------
// Persistence adapter
// ---------------------------------------------------------------------------

/// The persisted order format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedOrder {
    /// Schema version of this record.
    pub format_version: u32,
    /// Item ids in display order.
    pub order: Vec<String>,
}

impl SavedOrder {
    /// Current schema version.
    pub const FORMAT_VERSION: u32 = 1;

    /// Record for the given order at the current version.
    #[must_use]
    pub fn new(order: Vec<String>) -> Self {
        Self {
            format_version: Self::FORMAT_VERSION,
            order,
        }
    }
}

/// Best-effort save/load of the item order through a [`KeyValueStore`].
pub struct PersistenceAdapter {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl fmt::Debug for PersistenceAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistenceAdapter")
            .field("store", &self.store.name())
            .field("key", &self.key)
            .finish()
    }
}

impl PersistenceAdapter {
    /// Adapter storing under `key` in the given backend.
    #[must_use]
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Save the order. Failures are logged and swallowed; the reorder
    /// flow never observes them.
    pub fn save(&mut self, order: &[String]) {
        let record = SavedOrder::new(order.to_vec());
        let payload = match serde_json::to_string(&record) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode saved order, skipping save");
                return;
            }
        };
        if let Err(e) = self.store.set(&self.key, &payload) {
            tracing::warn!(
                store = self.store.name(),
                key = %self.key,
                error = %e,
                "failed to persist item order"
            );
        } else {
            tracing::debug!(key = %self.key, items = order.len(), "persisted item order");
        }
    }

    /// Load a previously saved order. Any failure (backend error,
    /// corrupt payload, version mismatch) is logged and yields `None`.
    #[must_use]
    pub fn load(&self) -> Option<Vec<String>> {
        let payload = match self.store.get(&self.key) {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(
                    store = self.store.name(),
                    key = %self.key,
                    error = %e,
                    "failed to read saved order"
                );
                return None;
            }
        };
        let record: SavedOrder = match serde_json::from_str(&payload) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "corrupt saved order, ignoring");
                return None;
            }
        };
        if record.format_version != SavedOrder::FORMAT_VERSION {
            tracing::warn!(
                stored = record.format_version,
                expected = SavedOrder::FORMAT_VERSION,
                "saved order version mismatch, ignoring"
            );
            return None;
        }
        Some(record.order)
    }
}
