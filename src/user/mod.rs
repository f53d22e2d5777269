//! The `users` collection: entity, validation, and repository.

mod config;
mod errors;
mod password;
mod postgres;
mod sqlite;
mod store;
mod types;

pub use errors::UserError;
pub use store::UserStore;
pub use types::User;
