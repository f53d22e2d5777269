//! Store configuration sourced from the environment.

use std::{env, sync::LazyLock};

use super::errors::StorageError;

static USER_DB_TYPE: LazyLock<String> =
    LazyLock::new(|| env::var("USER_DB_TYPE").unwrap_or_else(|_| "sqlite".to_string()));

static USER_DB_URL: LazyLock<String> =
    LazyLock::new(|| env::var("USER_DB_URL").unwrap_or_else(|_| "sqlite:users.db".to_string()));

/// Which backend a [`StoreConfig`] points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreType {
    Sqlite,
    Postgres,
}

/// Settings for opening the backing store.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    store_type: StoreType,
    url: String,
}

impl StoreConfig {
    pub fn sqlite(url: impl Into<String>) -> Self {
        Self {
            store_type: StoreType::Sqlite,
            url: url.into(),
        }
    }

    pub fn postgres(url: impl Into<String>) -> Self {
        Self {
            store_type: StoreType::Postgres,
            url: url.into(),
        }
    }

    /// Read `USER_DB_TYPE` and `USER_DB_URL`, falling back to a local SQLite
    /// database when unset. A `.env` file is honored when present.
    pub fn from_env() -> Result<Self, StorageError> {
        dotenvy::dotenv().ok();

        match USER_DB_TYPE.as_str() {
            "sqlite" => Ok(Self::sqlite(USER_DB_URL.as_str())),
            "postgres" => Ok(Self::postgres(USER_DB_URL.as_str())),
            t => Err(StorageError::UnsupportedStoreType(t.to_string())),
        }
    }

    pub fn store_type(&self) -> StoreType {
        self.store_type
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
