//! Connection management for the backing store.
//!
//! [`DataStore`] owns the one connection pool the whole process shares. It
//! is constructed explicitly (from a [`StoreConfig`] or the environment) and
//! handed to the repository, rather than living in ambient global state.

mod config;
mod errors;
mod types;

use std::str::FromStr;

use sqlx::PgPool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use tokio::sync::Mutex;

pub use config::{StoreConfig, StoreType};
pub use errors::StorageError;
pub use types::StorePool;

enum ConnState {
    Uninitialized,
    Ready(StorePool),
    Failed(String),
}

/// Shared handle to the backing store.
///
/// `connect()` establishes the underlying pool on first use and memoizes it;
/// every later or concurrent caller receives a clone of the same pool. A
/// failed connection attempt is memoized too (sticky): callers keep seeing
/// the original failure until `disconnect()` resets the handle.
pub struct DataStore {
    config: StoreConfig,
    state: Mutex<ConnState>,
}

impl DataStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            state: Mutex::new(ConnState::Uninitialized),
        }
    }

    /// Build a handle from `USER_DB_TYPE` / `USER_DB_URL`.
    pub fn from_env() -> Result<Self, StorageError> {
        Ok(Self::new(StoreConfig::from_env()?))
    }

    /// Connect once, share thereafter.
    ///
    /// The state lock is held across the connection attempt, so two
    /// concurrent first calls can never open two pools: the second caller
    /// waits and then finds the memoized result, success or failure.
    pub async fn connect(&self) -> Result<StorePool, StorageError> {
        let mut state = self.state.lock().await;

        match &*state {
            ConnState::Ready(pool) => Ok(pool.clone()),
            ConnState::Failed(reason) => Err(StorageError::Connection(format!(
                "data store connection previously failed: {reason}; call disconnect() to reset"
            ))),
            ConnState::Uninitialized => {
                tracing::info!(
                    store_type = ?self.config.store_type(),
                    url = %self.config.url(),
                    "Connecting to data store"
                );

                match self.open_pool().await {
                    Ok(pool) => {
                        *state = ConnState::Ready(pool.clone());
                        Ok(pool)
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Data store connection failed");
                        *state = ConnState::Failed(e.to_string());
                        Err(e)
                    }
                }
            }
        }
    }

    async fn open_pool(&self) -> Result<StorePool, StorageError> {
        match self.config.store_type() {
            StoreType::Sqlite => {
                let opts = SqliteConnectOptions::from_str(self.config.url())
                    .map_err(|e| StorageError::Connection(e.to_string()))?
                    .create_if_missing(true);

                let pool = SqlitePool::connect_with(opts)
                    .await
                    .map_err(|e| StorageError::Connection(e.to_string()))?;
                Ok(StorePool::Sqlite(pool))
            }
            StoreType::Postgres => {
                let pool = PgPool::connect(self.config.url())
                    .await
                    .map_err(|e| StorageError::Connection(e.to_string()))?;
                Ok(StorePool::Postgres(pool))
            }
        }
    }

    /// Close the pool, if any, and return the handle to its initial state so
    /// a later `connect()` starts fresh. Also clears a memoized failure.
    /// Idempotent when nothing is connected.
    pub async fn disconnect(&self) {
        let mut state = self.state.lock().await;

        if let ConnState::Ready(pool) = &*state {
            pool.close().await;
        }
        *state = ConnState::Uninitialized;
    }
}
