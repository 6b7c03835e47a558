/// Database connection and migration tests
pub mod db_tests;

/// CRUD operations against the `details` table
pub mod record_tests;

use configs::DatabaseConfig;

/// Postgres config for tests, or `None` when tests should be skipped.
pub(crate) fn test_db_config() -> Option<DatabaseConfig> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let url = std::env::var("DATABASE_URL").ok()?;
    if !url.starts_with("postgres") {
        return None;
    }
    Some(DatabaseConfig { url, min_connections: 1, max_connections: 5, ..Default::default() })
}
