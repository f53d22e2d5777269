//! Users table configuration

use std::env;
use std::sync::LazyLock;

/// Users table name from environment variable
pub(crate) static DB_TABLE_USERS: LazyLock<String> =
    LazyLock::new(|| env::var("DB_TABLE_USERS").unwrap_or_else(|_| "users".to_string()));

#[cfg(test)]
mod tests {
    use std::env;

    #[test]
    fn test_db_table_users_default() {
        // Test the fallback expression directly; dereferencing the LazyLock
        // would pin the process-wide value for other tests.
        unsafe {
            let original = env::var("DB_TABLE_USERS").ok();
            env::remove_var("DB_TABLE_USERS");

            let table = env::var("DB_TABLE_USERS").unwrap_or_else(|_| "users".to_string());
            assert_eq!(table, "users");

            if let Some(value) = original {
                env::set_var("DB_TABLE_USERS", value);
            }
        }
    }
}
