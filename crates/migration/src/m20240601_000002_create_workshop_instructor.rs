//! Create `workshop_instructor` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkshopInstructor::Table)
                    .if_not_exists()
                    .col(uuid(WorkshopInstructor::Id).primary_key())
                    .col(string_len(WorkshopInstructor::Name, 255).not_null())
                    .col(string_len(WorkshopInstructor::Occupation, 255).not_null())
                    .col(ColumnDef::new(WorkshopInstructor::Avatar).string_len(255).null())
                    .col(timestamp_with_time_zone(WorkshopInstructor::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(WorkshopInstructor::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(WorkshopInstructor::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum WorkshopInstructor { Table, Id, Name, Occupation, Avatar, CreatedAt, UpdatedAt }
