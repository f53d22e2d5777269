use thiserror::Error;

use crate::storage::StorageError;

/// Failures surfaced by the user repository.
///
/// Both duplicate paths — the application-level pre-check and the store's
/// unique index rejecting the loser of a create race — are normalized to
/// [`UserError::DuplicateUsername`], so callers see one error kind
/// regardless of timing.
#[derive(Clone, Error, Debug)]
pub enum UserError {
    #[error("user validation failed: {field}: Path `{field}` is required.")]
    MissingField { field: &'static str },

    #[error("User name already exists")]
    DuplicateUsername,

    #[error("Cannot change username")]
    UsernameImmutable,

    #[error("User not found")]
    NotFound,

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl UserError {
    /// Map an insert failure, folding the store's unique-constraint
    /// violation into the same error the pre-check produces.
    pub(crate) fn from_insert_error(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => UserError::DuplicateUsername,
            _ => UserError::Storage(err.to_string()),
        }
    }
}

impl From<StorageError> for UserError {
    fn from(err: StorageError) -> Self {
        UserError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for UserError {
    fn from(err: serde_json::Error) -> Self {
        UserError::InvalidData(err.to_string())
    }
}
