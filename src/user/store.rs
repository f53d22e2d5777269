use std::sync::Arc;

use uuid::Uuid;

use crate::storage::DataStore;

use super::errors::UserError;
use super::password::{hash_password, verify_password};
use super::postgres::*;
use super::sqlite::*;
use super::types::{User, UserSearchField, validate_required};

/// Repository for the `users` collection.
///
/// Holds the shared [`DataStore`] handle it was constructed with; every
/// operation awaits the memoized connection and issues store calls against
/// it. No queueing, no retries.
pub struct UserStore {
    store: Arc<DataStore>,
}

impl UserStore {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    /// Initialize the users table. Idempotent.
    pub async fn init(&self) -> Result<(), UserError> {
        let pool = self.store.connect().await?;

        if let Some(pool) = pool.as_sqlite() {
            create_tables_sqlite(pool).await
        } else if let Some(pool) = pool.as_postgres() {
            create_tables_postgres(pool).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Create a user, enforcing username uniqueness.
    ///
    /// `username` and `full_name` accept any displayable value; non-string
    /// inputs are coerced to their string form before validation and
    /// storage. The lookup-before-insert is a fast path for a readable
    /// error: two concurrent creates can both pass it, and the store's
    /// unique index then rejects the loser, which surfaces as the same
    /// [`UserError::DuplicateUsername`].
    pub async fn create_user(
        &self,
        username: impl ToString,
        full_name: impl ToString,
        company_name: Option<&str>,
    ) -> Result<User, UserError> {
        let username = username.to_string();
        let full_name = full_name.to_string();
        validate_required("username", &username)?;
        validate_required("fullName", &full_name)?;

        if self.find_user_by_username(&username).await?.is_some() {
            return Err(UserError::DuplicateUsername);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username,
            full_name,
            company_name: company_name.unwrap_or_default().to_string(),
        };

        let pool = self.store.connect().await?;
        let result = if let Some(pool) = pool.as_sqlite() {
            insert_user_sqlite(pool, &user).await
        } else if let Some(pool) = pool.as_postgres() {
            insert_user_postgres(pool, &user).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(()) => {
                tracing::info!(user_id = %user.id, username = %user.username, "User created");
            }
            Err(e) => {
                tracing::error!(error = %e, "User creation failed");
            }
        }

        result.map(|()| user)
    }

    /// Point lookup by store-assigned id. Absence is `Ok(None)`, never an
    /// error.
    pub async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, UserError> {
        self.get_user_by(UserSearchField::Id(id.to_string())).await
    }

    /// Lookup by username; also serves as the create pre-check.
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        self.get_user_by(UserSearchField::Username(username.to_string()))
            .await
    }

    #[tracing::instrument(skip(self), fields(user_field = %field))]
    async fn get_user_by(&self, field: UserSearchField) -> Result<Option<User>, UserError> {
        let pool = self.store.connect().await?;

        let result = if let Some(pool) = pool.as_sqlite() {
            get_user_by_field_sqlite(pool, &field).await
        } else if let Some(pool) = pool.as_postgres() {
            get_user_by_field_postgres(pool, &field).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(Some(_)) => {
                tracing::debug!(found = true, "User lookup completed");
            }
            Ok(None) => {
                tracing::debug!(found = false, "User lookup completed - not found");
            }
            Err(e) => {
                tracing::error!(error = %e, "User lookup failed");
            }
        }

        result
    }

    /// Replace the document identified by `user.id`.
    ///
    /// Required fields are re-validated exactly like create. The username
    /// is immutable: a patch carrying a different username is rejected
    /// before anything is written. The stored password hash is preserved.
    pub async fn update_user(&self, user: &User) -> Result<User, UserError> {
        validate_required("username", &user.username)?;
        validate_required("fullName", &user.full_name)?;

        let existing = self
            .find_user_by_id(&user.id)
            .await?
            .ok_or(UserError::NotFound)?;
        if existing.username != user.username {
            return Err(UserError::UsernameImmutable);
        }

        let pool = self.store.connect().await?;
        let rows = if let Some(pool) = pool.as_sqlite() {
            update_user_sqlite(pool, user).await
        } else if let Some(pool) = pool.as_postgres() {
            update_user_postgres(pool, user).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }?;

        if rows == 0 {
            // Row vanished between the read and the write
            return Err(UserError::NotFound);
        }

        tracing::info!(user_id = %user.id, "User updated");
        Ok(user.clone())
    }

    /// Store a one-way hash of `plaintext` against the user.
    ///
    /// Neither the plaintext nor the hash is logged.
    pub async fn set_user_password(
        &self,
        username: &str,
        plaintext: &str,
    ) -> Result<(), UserError> {
        let hash = hash_password(plaintext)?;

        let pool = self.store.connect().await?;
        let rows = if let Some(pool) = pool.as_sqlite() {
            set_password_hash_sqlite(pool, username, &hash).await
        } else if let Some(pool) = pool.as_postgres() {
            set_password_hash_postgres(pool, username, &hash).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }?;

        if rows == 0 {
            return Err(UserError::NotFound);
        }

        tracing::info!(username = %username, "User password set");
        Ok(())
    }

    /// Look the user up and verify the supplied password.
    ///
    /// Returns the user only when a hash exists and the plaintext verifies
    /// against it; a missing user, a user without a password, and a
    /// mismatch are all `Ok(None)`. The returned [`User`] carries no hash
    /// field by construction.
    pub async fn find_user_verify_password(
        &self,
        username: &str,
        plaintext: &str,
    ) -> Result<Option<User>, UserError> {
        let pool = self.store.connect().await?;
        let hash = if let Some(pool) = pool.as_sqlite() {
            get_password_hash_sqlite(pool, username).await
        } else if let Some(pool) = pool.as_postgres() {
            get_password_hash_postgres(pool, username).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }?;

        let Some(hash) = hash else {
            return Ok(None);
        };
        if !verify_password(&hash, plaintext)? {
            return Ok(None);
        }

        self.find_user_by_username(username).await
    }

    /// Unconditionally clear the collection. Test and ops use only.
    pub async fn delete_all_users(&self) -> Result<(), UserError> {
        let pool = self.store.connect().await?;

        if let Some(pool) = pool.as_sqlite() {
            delete_all_users_sqlite(pool).await
        } else if let Some(pool) = pool.as_postgres() {
            delete_all_users_postgres(pool).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }
}
