//! Shared test helpers.
//!
//! Every test gets its own named shared-cache in-memory SQLite database, so
//! suites run in parallel without bleeding state into each other and without
//! touching the filesystem.

use std::sync::Arc;

use crate::storage::{DataStore, StoreConfig};
use crate::user::UserStore;

/// A store config pointing at a fresh in-memory database.
///
/// The name must be unique per test: shared-cache in-memory databases with
/// the same name are the same database.
pub(crate) fn memory_store_config() -> StoreConfig {
    StoreConfig::sqlite(format!(
        "sqlite:file:userdb-test-{}?mode=memory&cache=shared",
        uuid::Uuid::new_v4()
    ))
}

pub(crate) fn memory_store() -> Arc<DataStore> {
    Arc::new(DataStore::new(memory_store_config()))
}

/// An initialized repository over a fresh in-memory database.
pub(crate) async fn user_store() -> UserStore {
    let store = UserStore::new(memory_store());
    store
        .init()
        .await
        .expect("failed to initialize user store");
    store
}
