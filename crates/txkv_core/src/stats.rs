//! Store statistics.
//!
//! Counters are atomic so read paths that only borrow the store can still
//! record themselves.
//!
//! ```rust
//! use txkv_core::TransactionalStore;
//!
//! let mut store = TransactionalStore::new();
//! store.begin_transaction().unwrap();
//! store.put("A", 1).unwrap();
//! store.commit().unwrap();
//!
//! let stats = store.stats();
//! assert_eq!(stats.transactions_committed, 1);
//! assert_eq!(stats.keys_merged, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Store statistics and counters.
///
/// Values are monotonically increasing.
#[derive(Debug, Default)]
pub(crate) struct StoreStats {
    // Transaction counters
    /// Total number of transactions started.
    transactions_started: AtomicU64,
    /// Total number of transactions committed.
    transactions_committed: AtomicU64,
    /// Total number of transactions rolled back.
    transactions_rolled_back: AtomicU64,

    // Operation counters
    /// Total number of staged writes.
    puts: AtomicU64,
    /// Total number of reads.
    reads: AtomicU64,
    /// Reads answered absent because a transaction was open.
    hidden_reads: AtomicU64,
    /// Total number of pending entries merged into the committed map.
    keys_merged: AtomicU64,

    // Error counters
    /// Total number of rejected operations.
    errors: AtomicU64,
}

impl StoreStats {
    /// Creates a new stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    // === Increment methods (internal use) ===

    pub(crate) fn record_transaction_start(&self) {
        self.transactions_started.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_transaction_commit(&self, merged: u64) {
        self.transactions_committed.fetch_add(1, Ordering::Relaxed);
        self.keys_merged.fetch_add(merged, Ordering::Relaxed);
    }

    pub(crate) fn record_transaction_rollback(&self) {
        self.transactions_rolled_back.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_put(&self) {
        self.puts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_read(&self, hidden: bool) {
        self.reads.fetch_add(1, Ordering::Relaxed);
        if hidden {
            self.hidden_reads.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    // === Getter methods (public API) ===

    /// Returns the total number of transactions started.
    pub fn transactions_started(&self) -> u64 {
        self.transactions_started.load(Ordering::Relaxed)
    }

    /// Returns the total number of transactions committed.
    pub fn transactions_committed(&self) -> u64 {
        self.transactions_committed.load(Ordering::Relaxed)
    }

    /// Returns the total number of transactions rolled back.
    pub fn transactions_rolled_back(&self) -> u64 {
        self.transactions_rolled_back.load(Ordering::Relaxed)
    }

    /// Returns the total number of staged writes.
    pub fn puts(&self) -> u64 {
        self.puts.load(Ordering::Relaxed)
    }

    /// Returns the total number of reads.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Returns the number of reads hidden by an open transaction.
    pub fn hidden_reads(&self) -> u64 {
        self.hidden_reads.load(Ordering::Relaxed)
    }

    /// Returns the total number of keys merged by commits.
    pub fn keys_merged(&self) -> u64 {
        self.keys_merged.load(Ordering::Relaxed)
    }

    /// Returns the total number of rejected operations.
    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of all stats.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            transactions_started: self.transactions_started(),
            transactions_committed: self.transactions_committed(),
            transactions_rolled_back: self.transactions_rolled_back(),
            puts: self.puts(),
            reads: self.reads(),
            hidden_reads: self.hidden_reads(),
            keys_merged: self.keys_merged(),
            errors: self.errors(),
        }
    }
}

/// A point-in-time snapshot of store statistics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Total number of transactions started.
    pub transactions_started: u64,
    /// Total number of transactions committed.
    pub transactions_committed: u64,
    /// Total number of transactions rolled back.
    pub transactions_rolled_back: u64,
    /// Total number of staged writes.
    pub puts: u64,
    /// Total number of reads.
    pub reads: u64,
    /// Reads answered absent because a transaction was open.
    pub hidden_reads: u64,
    /// Total number of keys merged by commits.
    pub keys_merged: u64,
    /// Total number of rejected operations.
    pub errors: u64,
}
