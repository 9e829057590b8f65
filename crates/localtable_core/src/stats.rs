//! Collection statistics.
//!
//! Counters for monitoring how a [`crate::CollectionStore`] uses its store.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use localtable_core::CollectionStore;
//! use localtable_storage::InMemoryStore;
//!
//! let tables = CollectionStore::new(Arc::new(InMemoryStore::new()));
//! tables.create("users", None, false).unwrap();
//!
//! let stats = tables.stats().snapshot();
//! assert_eq!(stats.tables_created, 1);
//! assert_eq!(stats.table_writes, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Collection statistics.
///
/// All counters are atomic and monotonically increasing.
#[derive(Debug, Default)]
pub struct CollectionStats {
    /// Table values read from the store.
    table_reads: AtomicU64,
    /// Table values written to the store.
    table_writes: AtomicU64,
    /// Bytes of table text read.
    bytes_read: AtomicU64,
    /// Bytes of table text written.
    bytes_written: AtomicU64,

    /// Tables created or re-initialized.
    tables_created: AtomicU64,
    /// Table entries deleted from the store.
    tables_dropped: AtomicU64,

    /// Successful `select` calls.
    selects: AtomicU64,

    /// Records appended by `insert`.
    records_inserted: AtomicU64,
    /// Records merged by `update`.
    records_updated: AtomicU64,
    /// Records swapped by `replace`.
    records_replaced: AtomicU64,
    /// Records deleted by a partial `remove`.
    records_removed: AtomicU64,

    /// Calls rejected with a recoverable error.
    rejections: AtomicU64,
}

impl CollectionStats {
    /// Creates a new stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    // === Increment methods (internal use) ===

    pub(crate) fn record_read(&self, bytes: u64) {
        self.table_reads.fetch_add(1, Ordering::Relaxed);
        self.bytes_read.fetch_add(bytes, Ordering::Relaxed);
    }

    pub(crate) fn record_write(&self, bytes: u64) {
        self.table_writes.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    pub(crate) fn record_create(&self) {
        self.tables_created.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_drop(&self) {
        self.tables_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_select(&self) {
        self.selects.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_inserted(&self, count: u64) {
        self.records_inserted.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn record_updated(&self) {
        self.records_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_replaced(&self) {
        self.records_replaced.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_removed(&self, count: u64) {
        self.records_removed.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn record_rejection(&self) {
        self.rejections.fetch_add(1, Ordering::Relaxed);
    }

    // === Getter methods (public API) ===

    /// Returns the number of table values read.
    pub fn table_reads(&self) -> u64 {
        self.table_reads.load(Ordering::Relaxed)
    }

    /// Returns the number of table values written.
    pub fn table_writes(&self) -> u64 {
        self.table_writes.load(Ordering::Relaxed)
    }

    /// Returns the total bytes of table text read.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read.load(Ordering::Relaxed)
    }

    /// Returns the total bytes of table text written.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    /// Returns the number of tables created.
    pub fn tables_created(&self) -> u64 {
        self.tables_created.load(Ordering::Relaxed)
    }

    /// Returns the number of tables dropped.
    pub fn tables_dropped(&self) -> u64 {
        self.tables_dropped.load(Ordering::Relaxed)
    }

    /// Returns the number of successful selects.
    pub fn selects(&self) -> u64 {
        self.selects.load(Ordering::Relaxed)
    }

    /// Returns the number of records inserted.
    pub fn records_inserted(&self) -> u64 {
        self.records_inserted.load(Ordering::Relaxed)
    }

    /// Returns the number of records updated.
    pub fn records_updated(&self) -> u64 {
        self.records_updated.load(Ordering::Relaxed)
    }

    /// Returns the number of records replaced.
    pub fn records_replaced(&self) -> u64 {
        self.records_replaced.load(Ordering::Relaxed)
    }

    /// Returns the number of records removed.
    pub fn records_removed(&self) -> u64 {
        self.records_removed.load(Ordering::Relaxed)
    }

    /// Returns the number of rejected calls.
    pub fn rejections(&self) -> u64 {
        self.rejections.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of all stats.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            table_reads: self.table_reads(),
            table_writes: self.table_writes(),
            bytes_read: self.bytes_read(),
            bytes_written: self.bytes_written(),
            tables_created: self.tables_created(),
            tables_dropped: self.tables_dropped(),
            selects: self.selects(),
            records_inserted: self.records_inserted(),
            records_updated: self.records_updated(),
            records_replaced: self.records_replaced(),
            records_removed: self.records_removed(),
            rejections: self.rejections(),
        }
    }
}

/// A point-in-time snapshot of collection statistics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Table values read.
    pub table_reads: u64,
    /// Table values written.
    pub table_writes: u64,
    /// Bytes of table text read.
    pub bytes_read: u64,
    /// Bytes of table text written.
    pub bytes_written: u64,
    /// Tables created.
    pub tables_created: u64,
    /// Tables dropped.
    pub tables_dropped: u64,
    /// Successful selects.
    pub selects: u64,
    /// Records inserted.
    pub records_inserted: u64,
    /// Records updated.
    pub records_updated: u64,
    /// Records replaced.
    pub records_replaced: u64,
    /// Records removed.
    pub records_removed: u64,
    /// Rejected calls.
    pub rejections: u64,
}
