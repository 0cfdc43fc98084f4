//! Create `booking_transaction` table with FK to `workshop`.
//!
//! Stores customer bookings and payment proof; includes soft-delete timestamp.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BookingTransaction::Table)
                    .if_not_exists()
                    .col(uuid(BookingTransaction::Id).primary_key())
                    .col(uuid(BookingTransaction::WorkshopId).not_null())
                    .col(string_len(BookingTransaction::Name, 255).not_null())
                    .col(string_len(BookingTransaction::Email, 255).not_null())
                    .col(string_len(BookingTransaction::Phone, 255).not_null())
                    .col(string_len(BookingTransaction::CustomerBankName, 255).not_null())
                    .col(string_len(BookingTransaction::CustomerBankAccount, 255).not_null())
                    .col(string_len(BookingTransaction::CustomerBankNumber, 255).not_null())
                    .col(string_len(BookingTransaction::BookingTrxId, 255).unique_key().not_null())
                    .col(integer(BookingTransaction::Quantity).not_null())
                    .col(decimal_len(BookingTransaction::Price, 15, 2).not_null())
                    .col(decimal_len(BookingTransaction::TotalAmount, 15, 2).not_null())
                    .col(boolean(BookingTransaction::IsPaid).not_null())
                    .col(string_len(BookingTransaction::Proof, 255).not_null())
                    .col(timestamp_with_time_zone(BookingTransaction::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(BookingTransaction::UpdatedAt).not_null())
                    .col(
                        ColumnDef::new(BookingTransaction::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_workshop")
                            .from(BookingTransaction::Table, BookingTransaction::WorkshopId)
                            .to(Workshop::Table, Workshop::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(BookingTransaction::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum BookingTransaction {
    Table,
    Id,
    WorkshopId,
    Name,
    Email,
    Phone,
    CustomerBankName,
    CustomerBankAccount,
    CustomerBankNumber,
    BookingTrxId,
    Quantity,
    Price,
    TotalAmount,
    IsPaid,
    Proof,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Workshop { Table, Id }
