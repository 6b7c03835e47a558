//! Migrator for the record store.
//! Migrations are registered in the order they must be applied.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_details;
mod m20240101_000002_add_details_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_details::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000002_add_details_indexes::Migration),
        ]
    }
}
