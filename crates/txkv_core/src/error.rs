//! Error types for txkv core.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
///
/// Both kinds are caller errors: the operation was invoked in a transaction
/// state that does not allow it. Retrying without changing that state fails
/// the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// `begin_transaction` was called while a transaction is open.
    #[error("Transaction already in progress.")]
    TransactionAlreadyActive,

    /// `put`, `commit` or `rollback` was called with no open transaction.
    #[error("No transaction in progress.")]
    NoActiveTransaction,
}
