use sqlx::{Pool, Postgres};

use super::config::DB_TABLE_USERS;
use super::errors::UserError;
use super::types::{User, UserSearchField};

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
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

pub(super) async fn get_user_by_field_postgres(
    pool: &Pool<Postgres>,
    field: &UserSearchField,
) -> Result<Option<User>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    match field {
        UserSearchField::Id(id) => sqlx::query_as::<_, User>(&format!(
            r#"
                SELECT id, username, full_name, company_name FROM {table_name} WHERE id = $1
                "#
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| UserError::Storage(e.to_string())),
        UserSearchField::Username(username) => sqlx::query_as::<_, User>(&format!(
            r#"
                SELECT id, username, full_name, company_name FROM {table_name} WHERE username = $1
                "#
        ))
        .bind(username)
        .fetch_optional(pool)
        .await
        .map_err(|e| UserError::Storage(e.to_string())),
    }
}

pub(super) async fn insert_user_postgres(
    pool: &Pool<Postgres>,
    user: &User,
) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name} (id, username, full_name, company_name)
        VALUES ($1, $2, $3, $4)
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
pub(super) async fn update_user_postgres(
    pool: &Pool<Postgres>,
    user: &User,
) -> Result<u64, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    let result = sqlx::query(&format!(
        r#"
        UPDATE {table_name} SET full_name = $1, company_name = $2 WHERE id = $3
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

pub(super) async fn set_password_hash_postgres(
    pool: &Pool<Postgres>,
    username: &str,
    hash: &str,
) -> Result<u64, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    let result = sqlx::query(&format!(
        r#"
        UPDATE {table_name} SET pw_hash = $1 WHERE username = $2
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
pub(super) async fn get_password_hash_postgres(
    pool: &Pool<Postgres>,
    username: &str,
) -> Result<Option<String>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    let hash: Option<Option<String>> = sqlx::query_scalar(&format!(
        r#"
        SELECT pw_hash FROM {table_name} WHERE username = $1
        "#
    ))
    .bind(username)
    .fetch_optional(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(hash.flatten())
}

pub(super) async fn delete_all_users_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
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
