use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::errors::UserError;

/// A stored user account.
///
/// The password hash, when one has been set, lives only in the backing
/// store; it is deliberately not a field of this type, so no code path can
/// return or serialize it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier, immutable once created
    pub id: String,
    /// Natural key, unique across all users
    pub username: String,
    /// Display name
    pub full_name: String,
    /// Always present on a read; defaults to `""` when never set
    pub company_name: String,
}

/// Field-equality filters supported by the repository lookups.
#[derive(Debug, Clone)]
pub(crate) enum UserSearchField {
    Id(String),
    Username(String),
}

impl fmt::Display for UserSearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserSearchField::Id(id) => write!(f, "id={id}"),
            UserSearchField::Username(username) => write!(f, "username={username}"),
        }
    }
}

/// Required-field check shared by create and update.
///
/// Empty and whitespace-only values are rejected identically to absent
/// ones. `field` is the serialized field name, which is what the error
/// message quotes.
pub(crate) fn validate_required(field: &'static str, value: &str) -> Result<(), UserError> {
    if value.trim().is_empty() {
        return Err(UserError::MissingField { field });
    }
    Ok(())
}
