//! Test fixtures and table helpers.
//!
//! Provides convenience functions for setting up collection stores over
//! in-memory or temporary file stores, plus common seeded tables.

use crate::diagnostics::RecordingDiagnostics;
use localtable_core::{CollectionStore, Config, Record};
use localtable_storage::{FileStore, InMemoryStore, KeyValueStore};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Name of the file used by file-backed fixtures.
pub const STORE_FILE: &str = "tables.json";

/// A collection store with a recording diagnostics sink and automatic cleanup.
pub struct TestStore {
    /// The collection store under test.
    pub tables: CollectionStore,
    /// The backing key-value store.
    pub backend: Arc<dyn KeyValueStore>,
    /// Every event the collection store emitted.
    pub diagnostics: Arc<RecordingDiagnostics>,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: Option<TempDir>,
}

impl TestStore {
    /// Creates a test store over a new in-memory store.
    pub fn memory() -> Self {
        Self::memory_with_config(Config::default())
    }

    /// Creates a test store over a new in-memory store with `config`.
    pub fn memory_with_config(config: Config) -> Self {
        let backend: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        Self::build(backend, config, None)
    }

    /// Creates a test store over a file store in a temporary directory.
    pub fn file() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join(STORE_FILE);
        let backend: Arc<dyn KeyValueStore> =
            Arc::new(FileStore::open(&path).expect("Failed to open file store"));
        Self::build(backend, Config::default(), Some(temp_dir))
    }

    /// Opens a second collection store over the same file, as a fresh
    /// process would see it.
    ///
    /// Returns `None` for in-memory fixtures.
    pub fn reopen(&self) -> Option<CollectionStore> {
        let path = self.path()?;
        let backend = FileStore::open(&path).expect("Failed to reopen file store");
        Some(CollectionStore::new(Arc::new(backend)))
    }

    /// Returns the store file path if file-based, None if in-memory.
    pub fn path(&self) -> Option<PathBuf> {
        self._temp_dir.as_ref().map(|d| d.path().join(STORE_FILE))
    }

    /// Returns the raw stored value for `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.backend.get(key).expect("Failed to read store")
    }

    fn build(backend: Arc<dyn KeyValueStore>, config: Config, temp_dir: Option<TempDir>) -> Self {
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let tables = CollectionStore::with_config(Arc::clone(&backend), config)
            .with_diagnostics(diagnostics.clone());
        Self {
            tables,
            backend,
            diagnostics,
            _temp_dir: temp_dir,
        }
    }
}

impl std::ops::Deref for TestStore {
    type Target = CollectionStore;

    fn deref(&self) -> &Self::Target {
        &self.tables
    }
}

/// Runs a test with a collection store over a temporary in-memory store.
pub fn with_temp_tables<F, R>(f: F) -> R
where
    F: FnOnce(&CollectionStore) -> R,
{
    let test_store = TestStore::memory();
    f(&test_store.tables)
}

/// Runs a test with a collection store over a temporary file store.
pub fn with_file_tables<F, R>(f: F) -> R
where
    F: FnOnce(&CollectionStore, &std::path::Path) -> R,
{
    let test_store = TestStore::file();
    let path = test_store.path().expect("File store should have a path");
    f(&test_store.tables, &path)
}

/// Converts a JSON object literal into a record.
///
/// # Panics
///
/// Panics if `value` is not an object.
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Converts a JSON array of objects into records.
///
/// # Panics
///
/// Panics if `value` is not an array of objects.
pub fn records(value: Value) -> Vec<Record> {
    serde_json::from_value(value).expect("expected a JSON array of objects")
}

/// Returns the `id` field of each record as a string.
pub fn ids(rows: &[Record]) -> Vec<String> {
    rows.iter()
        .map(|r| match r.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        })
        .collect()
}

/// Seeded tables for common scenarios.
pub mod scenarios {
    use super::*;
    use serde_json::json;

    /// Creates `table` holding records with ids `a`, `b`, `c`, `d`.
    pub fn letters(tables: &CollectionStore, table: &str) {
        let rows = records(json!([
            {"id": "a", "group": 1},
            {"id": "b", "group": 2},
            {"id": "c", "group": 1},
            {"id": "d", "group": 2},
        ]));
        tables
            .create(table, Some(rows), true)
            .expect("Failed to create letters table");
    }

    /// Creates `table` holding `count` records `{"id": i, "even": bool}`.
    pub fn numbered(tables: &CollectionStore, table: &str, count: usize) {
        let rows = (0..count)
            .map(|i| record(json!({"id": i, "even": i % 2 == 0})))
            .collect();
        tables
            .create(table, Some(rows), true)
            .expect("Failed to create numbered table");
    }
}
