//! Create `workshop_benefit` table; rows are owned by their workshop.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkshopBenefit::Table)
                    .if_not_exists()
                    .col(uuid(WorkshopBenefit::Id).primary_key())
                    .col(uuid(WorkshopBenefit::WorkshopId).not_null())
                    .col(string_len(WorkshopBenefit::Name, 255).not_null())
                    .col(integer(WorkshopBenefit::Position).not_null())
                    .col(timestamp_with_time_zone(WorkshopBenefit::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(WorkshopBenefit::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_benefit_workshop")
                            .from(WorkshopBenefit::Table, WorkshopBenefit::WorkshopId)
                            .to(Workshop::Table, Workshop::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(WorkshopBenefit::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum WorkshopBenefit { Table, Id, WorkshopId, Name, Position, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Workshop { Table, Id }
