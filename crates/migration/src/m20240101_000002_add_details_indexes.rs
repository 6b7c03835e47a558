use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Details: listing is ordered by creation time
        manager
            .create_index(
                Index::create()
                    .name("idx_details_created_at")
                    .table(Details::Table)
                    .col(Details::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_details_created_at")
                    .table(Details::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Details {
    Table,
    CreatedAt,
}
