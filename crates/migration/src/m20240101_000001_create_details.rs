//! Create `details` table.
//! Holds contact records and the public path of their attached image.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Details::Table)
                    .if_not_exists()
                    .col(uuid(Details::Id).primary_key())
                    .col(text_null(Details::Name))
                    .col(text_null(Details::Email))
                    .col(text_null(Details::Contact))
                    .col(text_null(Details::Address))
                    .col(text(Details::ImageUrl).default(""))
                    .col(timestamp_with_time_zone(Details::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Details::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Details {
    Table,
    Id,
    Name,
    Email,
    Contact,
    Address,
    ImageUrl,
    CreatedAt,
}
