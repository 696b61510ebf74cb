//! Replayable store operations.

use txkv_core::{StoreError, TransactionalStore, Value};

/// One call against a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// `begin_transaction()`
    Begin,
    /// `put(key, value)`
    Put(String, Value),
    /// `get(key)`
    Get(String),
    /// `commit()`
    Commit,
    /// `rollback()`
    Rollback,
}

/// Observable result of an [`Op`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation succeeded and returns nothing.
    Done,
    /// A read and its result.
    Read(Option<Value>),
    /// The operation was rejected.
    Failed(StoreError),
}

impl From<Result<(), StoreError>> for Outcome {
    fn from(result: Result<(), StoreError>) -> Self {
        match result {
            Ok(()) => Self::Done,
            Err(err) => Self::Failed(err),
        }
    }
}

/// Applies one operation to a store.
pub fn apply(store: &mut TransactionalStore, op: &Op) -> Outcome {
    match op {
        Op::Begin => store.begin_transaction().into(),
        Op::Put(key, value) => store.put(key.as_str(), *value).into(),
        Op::Get(key) => Outcome::Read(store.get(key)),
        Op::Commit => store.commit().into(),
        Op::Rollback => store.rollback().into(),
    }
}

/// Applies operations in order and collects their outcomes.
pub fn run_ops(store: &mut TransactionalStore, ops: &[Op]) -> Vec<Outcome> {
    ops.iter().map(|op| apply(store, op)).collect()
}

/// The demonstration sequence, paired with the outcome each step must have.
pub fn demo_ops() -> Vec<(Op, Outcome)> {
    use Op::*;
    vec![
        (Get("A".into()), Outcome::Read(None)),
        (Put("A".into(), 5), Outcome::Failed(StoreError::NoActiveTransaction)),
        (Begin, Outcome::Done),
        (Put("A".into(), 5), Outcome::Done),
        (Get("A".into()), Outcome::Read(None)),
        (Put("A".into(), 6), Outcome::Done),
        (Commit, Outcome::Done),
        (Get("A".into()), Outcome::Read(Some(6))),
        (Commit, Outcome::Failed(StoreError::NoActiveTransaction)),
        (Rollback, Outcome::Failed(StoreError::NoActiveTransaction)),
        (Get("B".into()), Outcome::Read(None)),
        (Begin, Outcome::Done),
        (Put("B".into(), 10), Outcome::Done),
        (Rollback, Outcome::Done),
        (Get("B".into()), Outcome::Read(None)),
    ]
}
