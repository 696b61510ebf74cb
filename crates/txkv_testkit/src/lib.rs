//! # txkv Testkit
//!
//! Test utilities for txkv.
//!
//! This crate provides:
//! - Store fixtures for common starting states
//! - A replayable operation type and driver
//! - A reference model of the store
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust
//! use txkv_testkit::prelude::*;
//!
//! let store = seeded_store(&[("A", 1)]);
//! let model = ModelStore::seeded(&[("A", 1)]);
//! assert_eq!(store.get("A"), model.get("A"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod model;
pub mod ops;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::model::*;
    pub use crate::ops::*;
}

pub use fixtures::*;
pub use generators::*;
pub use model::*;
pub use ops::*;
