//! Create `workshop` table with FKs to `category` and `workshop_instructor`.
//!
//! Catalog entries are soft-deleted through `deleted_at`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Workshop::Table)
                    .if_not_exists()
                    .col(uuid(Workshop::Id).primary_key())
                    .col(string_len(Workshop::Name, 255).not_null())
                    .col(string_len(Workshop::Slug, 255).not_null())
                    .col(string_len(Workshop::Thumbnail, 255).not_null())
                    .col(string_len(Workshop::VenueThumbnail, 255).not_null())
                    .col(string_len(Workshop::BgMap, 255).not_null())
                    .col(string_len(Workshop::Address, 255).not_null())
                    .col(text(Workshop::About).not_null())
                    .col(decimal_len(Workshop::Price, 15, 2).not_null())
                    .col(boolean(Workshop::IsOpen).not_null())
                    .col(boolean(Workshop::HasStarted).not_null())
                    .col(date(Workshop::StartedAt).not_null())
                    .col(time(Workshop::TimeAt).not_null())
                    .col(uuid(Workshop::CategoryId).not_null())
                    .col(uuid(Workshop::WorkshopInstructorId).not_null())
                    .col(timestamp_with_time_zone(Workshop::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Workshop::UpdatedAt).not_null())
                    .col(
                        ColumnDef::new(Workshop::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_workshop_category")
                            .from(Workshop::Table, Workshop::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_workshop_instructor")
                            .from(Workshop::Table, Workshop::WorkshopInstructorId)
                            .to(WorkshopInstructor::Table, WorkshopInstructor::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Workshop::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Workshop {
    Table,
    Id,
    Name,
    Slug,
    Thumbnail,
    VenueThumbnail,
    BgMap,
    Address,
    About,
    Price,
    IsOpen,
    HasStarted,
    StartedAt,
    TimeAt,
    CategoryId,
    WorkshopInstructorId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Category { Table, Id }

#[derive(DeriveIden)]
enum WorkshopInstructor { Table, Id }
