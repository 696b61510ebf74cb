//! Transactional store.

use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use crate::stats::{StatsSnapshot, StoreStats};
use crate::types::{TransactionState, Value, ABSENT};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

/// In-memory key-value store with one transaction at a time.
///
/// The store keeps two maps:
/// - the committed map, visible to reads while no transaction is open
/// - the pending overlay, holding the staged writes of the open transaction
///
/// Writes are only accepted inside a transaction. While a transaction is
/// open, reads see nothing at all, including the transaction's own writes
/// (unless [`Config::read_your_writes`] is set).
///
/// ## Invariants
///
/// - The pending overlay is empty whenever the state is
///   [`TransactionState::Idle`].
/// - The committed map only changes in [`commit`](Self::commit).
#[derive(Debug)]
pub struct TransactionalStore {
    /// Committed key-value pairs.
    committed: HashMap<String, Value>,
    /// Writes staged by the open transaction.
    pending: HashMap<String, Value>,
    /// Current transaction state.
    state: TransactionState,
    config: Config,
    stats: StoreStats,
}

impl Default for TransactionalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionalStore {
    /// Creates an empty store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty store with a custom configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            committed: HashMap::with_capacity(config.committed_capacity),
            pending: HashMap::with_capacity(config.pending_capacity),
            state: TransactionState::Idle,
            config,
            stats: StoreStats::new(),
        }
    }

    /// Begins a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TransactionAlreadyActive`] if a transaction is
    /// already open.
    pub fn begin_transaction(&mut self) -> StoreResult<()> {
        if self.state.is_active() {
            return Err(self.reject(StoreError::TransactionAlreadyActive));
        }
        debug_assert!(self.pending.is_empty());

        self.state = TransactionState::Active;
        self.stats.record_transaction_start();
        debug!(committed = self.committed.len(), "transaction started");
        Ok(())
    }

    /// Stages a write in the open transaction.
    ///
    /// Writing the same key twice in one transaction keeps the last value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoActiveTransaction`] if no transaction is open.
    pub fn put(&mut self, key: impl Into<String>, value: Value) -> StoreResult<()> {
        self.ensure_active()?;

        let key = key.into();
        trace!(key = %key, value, "staging write");
        self.pending.insert(key, value);
        self.stats.record_put();
        Ok(())
    }

    /// Reads a key.
    ///
    /// Returns `None` while a transaction is open, whatever the key. With no
    /// open transaction, returns the committed value if there is one.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        let value = match self.state {
            TransactionState::Active if self.config.read_your_writes => self
                .pending
                .get(key)
                .or_else(|| self.committed.get(key))
                .copied(),
            TransactionState::Active => None,
            TransactionState::Idle => self.committed.get(key).copied(),
        };

        let hidden = self.state.is_active() && !self.config.read_your_writes;
        self.stats.record_read(hidden);
        trace!(key, ?value, hidden, "read");
        value
    }

    /// Reads a key, reporting absence as [`ABSENT`].
    ///
    /// Same visibility rules as [`get`](Self::get).
    #[must_use]
    pub fn get_or_sentinel(&self, key: &str) -> Value {
        self.get(key).unwrap_or(ABSENT)
    }

    /// Commits the open transaction.
    ///
    /// Every staged write is merged into the committed map before the
    /// transaction is marked finished.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoActiveTransaction`] if no transaction is open.
    pub fn commit(&mut self) -> StoreResult<()> {
        self.ensure_active()?;

        let merged = self.pending.len();
        self.committed.extend(self.pending.drain());
        self.state = TransactionState::Idle;

        self.stats.record_transaction_commit(merged as u64);
        debug!(merged, committed = self.committed.len(), "transaction committed");
        Ok(())
    }

    /// Rolls back the open transaction, discarding its staged writes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoActiveTransaction`] if no transaction is open.
    pub fn rollback(&mut self) -> StoreResult<()> {
        self.ensure_active()?;

        let discarded = self.pending.len();
        self.pending.clear();
        self.state = TransactionState::Idle;

        self.stats.record_transaction_rollback();
        debug!(discarded, "transaction rolled back");
        Ok(())
    }

    /// Runs `f` inside a transaction.
    ///
    /// Commits if `f` returns `Ok` and rolls back if it returns `Err`. If `f`
    /// ends the transaction itself, its result is returned as is.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TransactionAlreadyActive`] without calling `f`
    /// if a transaction is already open, or the error returned by `f`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use txkv_core::TransactionalStore;
    ///
    /// let mut store = TransactionalStore::new();
    /// store
    ///     .transaction(|tx| {
    ///         tx.put("a", 1)?;
    ///         tx.put("b", 2)
    ///     })
    ///     .unwrap();
    /// assert_eq!(store.get("b"), Some(2));
    /// ```
    pub fn transaction<F, T>(&mut self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Self) -> StoreResult<T>,
    {
        self.begin_transaction()?;

        match f(self) {
            Ok(value) => {
                if self.state.is_active() {
                    self.commit()?;
                }
                Ok(value)
            }
            Err(err) => {
                if self.state.is_active() {
                    self.rollback()?;
                }
                Err(err)
            }
        }
    }

    /// Returns the current transaction state.
    #[must_use]
    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Checks if a transaction is open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Returns the number of committed keys.
    #[must_use]
    pub fn committed_len(&self) -> usize {
        self.committed.len()
    }

    /// Returns the number of keys staged by the open transaction.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Iterates over committed pairs in arbitrary order.
    ///
    /// This bypasses transaction visibility and is meant for inspection.
    pub fn committed(&self) -> impl Iterator<Item = (&str, Value)> {
        self.committed.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Returns a sorted copy of the committed map.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.committed
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }

    /// Returns the store configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a snapshot of the store statistics.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    fn ensure_active(&self) -> StoreResult<()> {
        if self.state.is_active() {
            Ok(())
        } else {
            Err(self.reject(StoreError::NoActiveTransaction))
        }
    }

    fn reject(&self, err: StoreError) -> StoreError {
        self.stats.record_error();
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(pairs: &[(&str, Value)]) -> TransactionalStore {
        let mut store = TransactionalStore::new();
        store.begin_transaction().unwrap();
        for (k, v) in pairs {
            store.put(*k, *v).unwrap();
        }
        store.commit().unwrap();
        store
    }

    #[test]
    fn new_store_is_idle_and_empty() {
        let store = TransactionalStore::new();
        assert_eq!(store.state(), TransactionState::Idle);
        assert_eq!(store.committed_len(), 0);
        assert_eq!(store.pending_len(), 0);
        assert_eq!(store.get("A"), None);
        assert_eq!(store.get_or_sentinel("A"), ABSENT);
    }

    #[test]
    fn begin_twice_fails() {
        let mut store = TransactionalStore::new();
        store.begin_transaction().unwrap();

        let result = store.begin_transaction();
        assert_eq!(result, Err(StoreError::TransactionAlreadyActive));
        assert!(store.is_active());
    }

    #[test]
    fn operations_require_transaction() {
        let mut store = TransactionalStore::new();
        assert_eq!(store.put("A", 1), Err(StoreError::NoActiveTransaction));
        assert_eq!(store.commit(), Err(StoreError::NoActiveTransaction));
        assert_eq!(store.rollback(), Err(StoreError::NoActiveTransaction));
        assert_eq!(store.stats().errors, 3);
    }

    #[test]
    fn put_overwrites_previous() {
        let mut store = TransactionalStore::new();
        store.begin_transaction().unwrap();
        store.put("A", 1).unwrap();
        store.put("A", 2).unwrap();
        assert_eq!(store.pending_len(), 1);

        store.commit().unwrap();
        assert_eq!(store.get("A"), Some(2));
    }

    #[test]
    fn reads_hidden_during_transaction() {
        let mut store = store_with(&[("A", 1)]);
        store.begin_transaction().unwrap();
        store.put("B", 2).unwrap();

        assert_eq!(store.get("A"), None);
        assert_eq!(store.get("B"), None);
        assert_eq!(store.get_or_sentinel("A"), ABSENT);
        assert_eq!(store.stats().hidden_reads, 3);
    }

    #[test]
    fn read_your_writes_sees_overlay_then_committed() {
        let mut store = TransactionalStore::with_config(Config::new().read_your_writes(true));
        store.begin_transaction().unwrap();
        store.put("A", 1).unwrap();
        store.commit().unwrap();

        store.begin_transaction().unwrap();
        store.put("B", 2).unwrap();
        store.put("A", 10).unwrap();

        assert_eq!(store.get("A"), Some(10));
        assert_eq!(store.get("B"), Some(2));
        assert_eq!(store.get("C"), None);

        store.rollback().unwrap();
        assert_eq!(store.get("A"), Some(1));
        assert_eq!(store.stats().hidden_reads, 0);
    }

    #[test]
    fn commit_merges_and_clears_pending() {
        let mut store = store_with(&[("A", 1), ("B", 2)]);
        store.begin_transaction().unwrap();
        store.put("B", 20).unwrap();
        store.put("C", 30).unwrap();
        store.commit().unwrap();

        assert!(!store.is_active());
        assert_eq!(store.pending_len(), 0);
        assert_eq!(store.get("A"), Some(1));
        assert_eq!(store.get("B"), Some(20));
        assert_eq!(store.get("C"), Some(30));
    }

    #[test]
    fn rollback_discards_pending() {
        let mut store = store_with(&[("A", 1)]);
        let before = store.snapshot();

        store.begin_transaction().unwrap();
        store.put("A", 100).unwrap();
        store.put("B", 200).unwrap();
        store.rollback().unwrap();

        assert!(!store.is_active());
        assert_eq!(store.pending_len(), 0);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn empty_commit_is_allowed() {
        let mut store = TransactionalStore::new();
        store.begin_transaction().unwrap();
        store.commit().unwrap();
        assert_eq!(store.committed_len(), 0);
        assert_eq!(store.stats().transactions_committed, 1);
    }

    #[test]
    fn empty_key_and_max_value_are_legal() {
        let store = store_with(&[("", ABSENT), ("min", Value::MIN)]);
        assert_eq!(store.get(""), Some(ABSENT));
        assert_eq!(store.get("min"), Some(Value::MIN));
        // The sentinel API cannot tell these apart.
        assert_eq!(store.get_or_sentinel(""), store.get_or_sentinel("missing"));
    }

    #[test]
    fn transaction_commits_on_ok() {
        let mut store = TransactionalStore::new();
        let n = store
            .transaction(|tx| {
                tx.put("A", 1)?;
                tx.put("B", 2)?;
                Ok(2)
            })
            .unwrap();

        assert_eq!(n, 2);
        assert!(!store.is_active());
        assert_eq!(store.get("B"), Some(2));
    }

    #[test]
    fn transaction_rolls_back_on_err() {
        let mut store = store_with(&[("A", 1)]);
        let result: StoreResult<()> = store.transaction(|tx| {
            tx.put("A", 2)?;
            tx.begin_transaction()
        });

        assert_eq!(result, Err(StoreError::TransactionAlreadyActive));
        assert!(!store.is_active());
        assert_eq!(store.get("A"), Some(1));
        assert_eq!(store.stats().transactions_rolled_back, 1);
    }

    #[test]
    fn transaction_fails_when_already_active() {
        let mut store = TransactionalStore::new();
        store.begin_transaction().unwrap();

        let mut called = false;
        let result = store.transaction(|_| {
            called = true;
            Ok(())
        });

        assert_eq!(result, Err(StoreError::TransactionAlreadyActive));
        assert!(!called);
        assert!(store.is_active());
    }

    #[test]
    fn transaction_closure_may_end_transaction() {
        let mut store = TransactionalStore::new();
        store
            .transaction(|tx| {
                tx.put("A", 1)?;
                tx.rollback()
            })
            .unwrap();

        assert_eq!(store.get("A"), None);
        assert_eq!(store.stats().transactions_committed, 0);
    }

    #[test]
    fn independent_instances() {
        let mut a = TransactionalStore::new();
        let b = TransactionalStore::new();
        a.begin_transaction().unwrap();
        a.put("X", 1).unwrap();
        a.commit().unwrap();

        assert_eq!(a.get("X"), Some(1));
        assert_eq!(b.get("X"), None);
        assert!(!b.is_active());
    }

    #[test]
    fn committed_iterates_all_pairs() {
        let store = store_with(&[("A", 1), ("B", 2)]);
        let mut pairs: Vec<_> = store.committed().collect();
        pairs.sort();
        assert_eq!(pairs, vec![("A", 1), ("B", 2)]);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn get_is_absent_while_active(
                committed in prop::collection::hash_map("[a-c]{0,2}", any::<i32>(), 0..8),
                staged in prop::collection::vec(("[a-c]{0,2}", any::<i32>()), 0..8),
                lookup in "[a-c]{0,2}",
            ) {
                let mut store = TransactionalStore::new();
                store.begin_transaction().unwrap();
                for (k, v) in &committed {
                    store.put(k.as_str(), *v).unwrap();
                }
                store.commit().unwrap();

                store.begin_transaction().unwrap();
                for (k, v) in &staged {
                    store.put(k.as_str(), *v).unwrap();
                }
                prop_assert_eq!(store.get(&lookup), None);
                prop_assert_eq!(store.get_or_sentinel(&lookup), ABSENT);
            }
        }
    }
}
