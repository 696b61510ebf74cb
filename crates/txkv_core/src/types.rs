//! Core type definitions for txkv.

use std::fmt;

/// Value type stored under each key.
pub type Value = i32;

/// Sentinel returned by [`get_or_sentinel`] when no value is visible.
///
/// This is the largest representable [`Value`]. A committed `Value::MAX` is
/// indistinguishable from absence through the sentinel API; use
/// [`get`] when that matters.
///
/// [`get`]: crate::TransactionalStore::get
/// [`get_or_sentinel`]: crate::TransactionalStore::get_or_sentinel
pub const ABSENT: Value = Value::MAX;

/// Transaction state of a store.
///
/// ```text
/// Idle ──begin──> Active
///  ▲                │
///  └─commit/rollback┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransactionState {
    /// No transaction is open. Reads see committed data.
    #[default]
    Idle,
    /// A transaction is open. Writes are staged, reads see nothing.
    Active,
}

impl TransactionState {
    /// Returns true if a transaction is open.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns the state name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Active => "active",
        }
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_is_max_value() {
        assert_eq!(ABSENT, 2_147_483_647);
    }

    #[test]
    fn default_state_is_idle() {
        assert_eq!(TransactionState::default(), TransactionState::Idle);
        assert!(!TransactionState::Idle.is_active());
        assert!(TransactionState::Active.is_active());
    }

    #[test]
    fn state_display() {
        assert_eq!(format!("{}", TransactionState::Idle), "idle");
        assert_eq!(format!("{}", TransactionState::Active), "active");
    }
}
