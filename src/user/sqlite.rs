use sqlx::{Pool, Sqlite};

use super::config::DB_TABLE_USERS;
use super::errors::UserError;
use super::types::{User, UserSearchField};

// SQLite implementations
pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    // Create users table; the UNIQUE constraint on username is the
    // authoritative uniqueness guarantee
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id TEXT PRIMARY KEY NOT NULL,
            username TEXT NOT NULL UNIQUE,
            full_name TEXT NOT NULL,
            company_name TEXT NOT NULL DEFAULT '',
            pw_hash TEXT
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn get_user_by_field_sqlite(
    pool: &Pool<Sqlite>,
    field: &UserSearchField,
) -> Result<Option<User>, UserError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_USERS.as_str();

    // pw_hash stays out of the column list; it never leaves the store
    match field {
        UserSearchField::Id(id) => sqlx::query_as::<_, User>(&format!(
            r#"
                SELECT id, username, full_name, company_name FROM {table_name} WHERE id = ?
                "#
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| UserError::Storage(e.to_string())),
        UserSearchField::Username(username) => sqlx::query_as::<_, User>(&format!(
            r#"
                SELECT id, username, full_name, company_name FROM {table_name} WHERE username = ?
                "#
        ))
        .bind(username)
        .fetch_optional(pool)
        .await
        .map_err(|e| UserError::Storage(e.to_string())),
    }
}

pub(super) async fn insert_user_sqlite(pool: &Pool<Sqlite>, user: &User) -> Result<(), UserError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name} (id, username, full_name, company_name)
        VALUES (?, ?, ?, ?)
        "#
    ))
    .bind(&user.id)
    .bind(&user.username)
    .bind(&user.full_name)
    .bind(&user.company_name)
    .execute(pool)
    .await
    .map_err(UserError::from_insert_error)?;

    Ok(())
}

/// Full-document replace keyed by id; username and pw_hash are untouched.
/// Returns the number of affected rows.
pub(super) async fn update_user_sqlite(pool: &Pool<Sqlite>, user: &User) -> Result<u64, UserError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_USERS.as_str();

    let result = sqlx::query(&format!(
        r#"
        UPDATE {table_name} SET full_name = ?, company_name = ? WHERE id = ?
        "#
    ))
    .bind(&user.full_name)
    .bind(&user.company_name)
    .bind(&user.id)
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(result.rows_affected())
}

pub(super) async fn set_password_hash_sqlite(
    pool: &Pool<Sqlite>,
    username: &str,
    hash: &str,
) -> Result<u64, UserError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_USERS.as_str();

    let result = sqlx::query(&format!(
        r#"
        UPDATE {table_name} SET pw_hash = ? WHERE username = ?
        "#
    ))
    .bind(hash)
    .bind(username)
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(result.rows_affected())
}

/// `None` when the user does not exist or has no stored hash.
pub(super) async fn get_password_hash_sqlite(
    pool: &Pool<Sqlite>,
    username: &str,
) -> Result<Option<String>, UserError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_USERS.as_str();

    let hash: Option<Option<String>> = sqlx::query_scalar(&format!(
        r#"
        SELECT pw_hash FROM {table_name} WHERE username = ?
        "#
    ))
    .bind(username)
    .fetch_optional(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(hash.flatten())
}

pub(super) async fn delete_all_users_sqlite(pool: &Pool<Sqlite>) -> Result<(), UserError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        DELETE FROM {table_name}
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(())
}
