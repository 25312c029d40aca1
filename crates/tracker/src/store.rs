//! Key-value history stores.
//!
//! Finished sessions are appended to a [`SessionHistory`] document kept
//! under [`HISTORY_KEY`].

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use dawdle_common::error::{DawdleError, DawdleResult};
use dawdle_model::history::{SessionHistory, SessionRecord, HISTORY_KEY};

/// Minimal key-value persistence.
pub trait HistoryStore: Send {
    /// Read a value, `None` when the key is absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: String) -> DawdleResult<()>;
}

/// In-memory store, lost when dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> DawdleResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// A JSON object file of string keys and values, rewritten on every set.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open a store, loading existing entries if the file exists.
    ///
    /// A file that is not a JSON object of strings is logged and treated as
    /// empty; the next write replaces it. Read failures are errors.
    pub fn open(path: impl Into<PathBuf>) -> DawdleResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "History file is unreadable, starting fresh"
                );
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> DawdleResult<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&self.path, json)
        };
        write().map_err(|e| {
            DawdleError::history(format!("Failed to write {}: {e}", self.path.display()))
        })
    }
}

impl HistoryStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> DawdleResult<()> {
        self.entries.insert(key.to_string(), value);
        self.persist()
    }
}

/// Load the stored history, starting fresh when absent or unreadable.
pub fn load_history(store: &dyn HistoryStore) -> SessionHistory {
    match store.get(HISTORY_KEY) {
        Some(json) => SessionHistory::from_json(&json).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Stored session history is unreadable, starting fresh");
            SessionHistory::default()
        }),
        None => SessionHistory::default(),
    }
}

/// Append a finished session to the stored history.
pub fn append_session(
    store: &mut dyn HistoryStore,
    record: SessionRecord,
) -> DawdleResult<SessionHistory> {
    let mut history = load_history(store);
    history.push(record);
    store.set(HISTORY_KEY, history.to_json()?)?;
    Ok(history)
}
