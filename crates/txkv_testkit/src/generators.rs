//! Property-based test generators using proptest.

use crate::ops::Op;
use proptest::prelude::*;
use txkv_core::{Value, ABSENT};

/// Strategy for keys drawn from a small alphabet, so operations collide.
///
/// Includes the empty key.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-D]{0,2}").expect("Invalid regex")
}

/// Strategy for values, weighted towards the edges of the range.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        6 => any::<Value>(),
        1 => Just(ABSENT),
        1 => Just(ABSENT - 1),
        1 => Just(Value::MIN),
        1 => Just(0),
    ]
}

/// Strategy for a single operation, puts and gets weighted highest.
pub fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => Just(Op::Begin),
        4 => (key_strategy(), value_strategy()).prop_map(|(k, v)| Op::Put(k, v)),
        3 => key_strategy().prop_map(Op::Get),
        1 => Just(Op::Commit),
        1 => Just(Op::Rollback),
    ]
}

/// Strategy for operation sequences of up to `max_len` steps.
pub fn ops_strategy(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 0..max_len)
}

/// Strategy for committed starting states.
pub fn pairs_strategy(max_len: usize) -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::vec((key_strategy(), value_strategy()), 0..max_len)
}
