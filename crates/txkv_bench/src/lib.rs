//! Benchmark utilities.

#![warn(missing_docs)]

use txkv_core::{TransactionalStore, Value};

/// Generate `count` distinct keys.
pub fn generate_keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("key-{i:08}")).collect()
}

/// Generate a store whose committed map holds `count` keys.
pub fn populated_store(count: usize) -> TransactionalStore {
    let keys = generate_keys(count);
    let mut store = TransactionalStore::new();
    store
        .transaction(|tx| {
            for (i, key) in keys.iter().enumerate() {
                tx.put(key.as_str(), i as Value)?;
            }
            Ok(())
        })
        .expect("Failed to populate store");
    store
}
