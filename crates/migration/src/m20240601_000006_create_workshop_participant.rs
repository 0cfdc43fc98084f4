//! Create `workshop_participant` table.
//!
//! One row per attendee; owned by a booking, counted per workshop.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkshopParticipant::Table)
                    .if_not_exists()
                    .col(uuid(WorkshopParticipant::Id).primary_key())
                    .col(uuid(WorkshopParticipant::WorkshopId).not_null())
                    .col(uuid(WorkshopParticipant::BookingTransactionId).not_null())
                    .col(string_len(WorkshopParticipant::Name, 255).not_null())
                    .col(string_len(WorkshopParticipant::Occupation, 255).not_null())
                    .col(string_len(WorkshopParticipant::Email, 255).not_null())
                    .col(integer(WorkshopParticipant::Position).not_null())
                    .col(timestamp_with_time_zone(WorkshopParticipant::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(WorkshopParticipant::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_participant_workshop")
                            .from(WorkshopParticipant::Table, WorkshopParticipant::WorkshopId)
                            .to(Workshop::Table, Workshop::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_participant_booking")
                            .from(WorkshopParticipant::Table, WorkshopParticipant::BookingTransactionId)
                            .to(BookingTransaction::Table, BookingTransaction::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(WorkshopParticipant::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum WorkshopParticipant {
    Table,
    Id,
    WorkshopId,
    BookingTransactionId,
    Name,
    Occupation,
    Email,
    Position,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Workshop { Table, Id }

#[derive(DeriveIden)]
enum BookingTransaction { Table, Id }
