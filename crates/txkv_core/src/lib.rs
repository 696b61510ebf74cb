//! # txkv Core
//!
//! Single-session transactional key-value store held entirely in memory.
//!
//! This crate provides:
//! - [`TransactionalStore`], a committed map with a pending overlay for the
//!   one open transaction
//! - The two precondition errors of the transaction lifecycle
//! - Store configuration and statistics
//!
//! ## Example
//!
//! ```rust
//! use txkv_core::{StoreError, TransactionalStore};
//!
//! let mut store = TransactionalStore::new();
//! assert_eq!(store.put("A", 5), Err(StoreError::NoActiveTransaction));
//!
//! store.begin_transaction().unwrap();
//! store.put("A", 5).unwrap();
//! assert_eq!(store.get("A"), None); // hidden while the transaction is open
//! store.put("A", 6).unwrap();
//! store.commit().unwrap();
//!
//! assert_eq!(store.get("A"), Some(6));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod stats;
mod store;
mod types;

pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use stats::StatsSnapshot;
pub use store::TransactionalStore;
pub use types::{TransactionState, Value, ABSENT};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
