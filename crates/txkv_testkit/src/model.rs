//! Reference model of the store.
//!
//! The open transaction is an `Option` holding its staged writes, so "idle
//! with pending writes" cannot be represented.

use crate::ops::{Op, Outcome};
use std::collections::BTreeMap;
use txkv_core::{StoreError, Value};

/// Naive store used as the oracle in property tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelStore {
    /// Committed pairs.
    pub committed: BTreeMap<String, Value>,
    /// Staged writes of the open transaction, if any.
    pub open: Option<BTreeMap<String, Value>>,
}

impl ModelStore {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a model with committed pairs already present.
    pub fn seeded(pairs: &[(&str, Value)]) -> Self {
        Self {
            committed: pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect(),
            open: None,
        }
    }

    /// Reads a key with hide-everything visibility.
    pub fn get(&self, key: &str) -> Option<Value> {
        match self.open {
            Some(_) => None,
            None => self.committed.get(key).copied(),
        }
    }

    /// Applies one operation.
    pub fn apply(&mut self, op: &Op) -> Outcome {
        match (op, self.open.is_some()) {
            (Op::Get(key), _) => Outcome::Read(self.get(key)),
            (Op::Begin, true) => Outcome::Failed(StoreError::TransactionAlreadyActive),
            (Op::Begin, false) => {
                self.open = Some(BTreeMap::new());
                Outcome::Done
            }
            (Op::Put(key, value), true) => {
                if let Some(staged) = self.open.as_mut() {
                    staged.insert(key.clone(), *value);
                }
                Outcome::Done
            }
            (Op::Commit, true) => {
                if let Some(staged) = self.open.take() {
                    self.committed.extend(staged);
                }
                Outcome::Done
            }
            (Op::Rollback, true) => {
                self.open = None;
                Outcome::Done
            }
            (Op::Put(..) | Op::Commit | Op::Rollback, false) => {
                Outcome::Failed(StoreError::NoActiveTransaction)
            }
        }
    }
}
