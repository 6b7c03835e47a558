use anyhow::Result;
use uuid::Uuid;

use super::test_db_config;
use crate::db::connect_and_migrate;
use crate::record::{self, Model, RecordFields};

fn fields(name: &str) -> RecordFields {
    RecordFields {
        name: Some(name.to_string()),
        email: Some("a@x.com".into()),
        contact: Some("555".into()),
        address: Some("1 Main St".into()),
    }
}

#[tokio::test]
async fn test_record_crud() -> Result<()> {
    let Some(cfg) = test_db_config() else { return Ok(()); };
    let db = connect_and_migrate(&cfg).await?;

    let name = format!("crud_{}", Uuid::new_v4());
    let created = record::insert(&db, Model::new(fields(&name), None)).await?;
    assert_eq!(created.name.as_deref(), Some(name.as_str()));
    assert_eq!(created.image_url, "");

    let found = record::find(&db, created.id).await?.expect("record exists");
    assert_eq!(found.id, created.id);
    assert_eq!(found.email.as_deref(), Some("a@x.com"));

    let mut changed = found.clone();
    changed.apply(RecordFields { name: Some("renamed".into()), ..Default::default() }, Some("/uploads/image-1.png".into()));
    let saved = record::save(&db, changed).await?.expect("row still present");
    assert_eq!(saved.name.as_deref(), Some("renamed"));
    assert_eq!(saved.email, None);
    assert_eq!(saved.image_url, "/uploads/image-1.png");
    assert_eq!(saved.created_at, created.created_at);

    assert!(record::delete(&db, created.id).await?);
    assert!(!record::delete(&db, created.id).await?);
    assert!(record::find(&db, created.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_save_missing_row_returns_none() -> Result<()> {
    let Some(cfg) = test_db_config() else { return Ok(()); };
    let db = connect_and_migrate(&cfg).await?;

    let ghost = Model::new(fields("ghost"), None);
    assert!(record::save(&db, ghost).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_list_contains_created_records_in_order() -> Result<()> {
    let Some(cfg) = test_db_config() else { return Ok(()); };
    let db = connect_and_migrate(&cfg).await?;

    let first = record::insert(&db, Model::new(fields("first"), None)).await?;
    let second = record::insert(&db, Model::new(fields("second"), None)).await?;

    let all = record::list(&db).await?;
    let pos_first = all.iter().position(|m| m.id == first.id).expect("first listed");
    let pos_second = all.iter().position(|m| m.id == second.id).expect("second listed");
    assert!(pos_first < pos_second);

    record::delete(&db, first.id).await?;
    record::delete(&db, second.id).await?;
    Ok(())
}
