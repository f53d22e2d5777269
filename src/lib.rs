//! User account storage for small services.
//!
//! This library provides a thin asynchronous data-access layer over a SQL
//! store for a single `users` collection: create a user, look one up by
//! identifier or username, update it, and set or verify a password. Username
//! uniqueness is enforced twice — an application-level pre-check for a fast,
//! readable error, backed by a unique index in the store that wins any race.
//!
//! Storage backends:
//! - SQLite (default, suitable for local use and tests)
//! - PostgreSQL
//!
//! # Getting Started
//!
//! ```no_run
//! use std::sync::Arc;
//! use userdb::{DataStore, UserStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(DataStore::from_env()?);
//!     let users = UserStore::new(store);
//!     users.init().await?;
//!
//!     let user = users
//!         .create_user("tonye", "Tony Enerson", Some("InceptionU"))
//!         .await?;
//!     println!("created {}", user.id);
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! The library reads its configuration from environment variables (a `.env`
//! file is honored when present):
//! - `USER_DB_TYPE`: `"sqlite"` (default) or `"postgres"`
//! - `USER_DB_URL`: connection string, default `sqlite:users.db`
//! - `DB_TABLE_USERS`: users table name, default `users`

mod storage;
mod user;

#[cfg(test)]
mod test_utils;

pub use storage::{DataStore, StorageError, StoreConfig, StorePool, StoreType};
pub use user::{User, UserError, UserStore};
