use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use anyhow::Result;

use super::test_db_config;
use crate::db::{close, connect_and_migrate, connect_with_config};

#[tokio::test]
async fn test_basic_connection() -> Result<()> {
    let Some(cfg) = test_db_config() else {
        println!("Skipping database tests (no DATABASE_URL or SKIP_DB_TESTS set)");
        return Ok(());
    };

    let db = connect_with_config(&cfg).await?;
    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1 as test".to_string());
    let row = db.query_one(stmt).await?.expect("one row");
    let test_value: i32 = row.try_get("", "test")?;
    assert_eq!(test_value, 1);

    close(db).await?;
    Ok(())
}

#[tokio::test]
async fn test_migrations_are_idempotent() -> Result<()> {
    let Some(cfg) = test_db_config() else { return Ok(()); };

    let db = connect_and_migrate(&cfg).await?;
    close(db).await?;
    // second run finds everything applied
    let db = connect_and_migrate(&cfg).await?;
    close(db).await?;
    Ok(())
}
