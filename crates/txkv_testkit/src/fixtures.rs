//! Store fixtures.

use txkv_core::{Config, TransactionalStore, Value};

/// Creates a store whose committed map holds `pairs`.
///
/// The pairs are written through a single committed transaction, so the
/// store's stats reflect one transaction.
pub fn seeded_store(pairs: &[(&str, Value)]) -> TransactionalStore {
    seeded_store_with_config(Config::default(), pairs)
}

/// Creates a seeded store with a custom configuration.
pub fn seeded_store_with_config(config: Config, pairs: &[(&str, Value)]) -> TransactionalStore {
    let mut store = TransactionalStore::with_config(config);
    store
        .transaction(|tx| {
            for (key, value) in pairs {
                tx.put(*key, *value)?;
            }
            Ok(())
        })
        .expect("Failed to seed store");
    store
}

/// Creates a store with a transaction open and `staged` written into it.
pub fn store_in_transaction(
    committed: &[(&str, Value)],
    staged: &[(&str, Value)],
) -> TransactionalStore {
    let mut store = seeded_store(committed);
    store.begin_transaction().expect("Failed to begin transaction");
    for (key, value) in staged {
        store.put(*key, *value).expect("Failed to stage write");
    }
    store
}
