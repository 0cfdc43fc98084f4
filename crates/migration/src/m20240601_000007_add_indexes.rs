use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: [(&str, &str, &str); 7] = [
    ("idx_workshop_category", "workshop", "category_id"),
    ("idx_workshop_instructor", "workshop", "workshop_instructor_id"),
    ("idx_workshop_slug", "workshop", "slug"),
    ("idx_benefit_workshop", "workshop_benefit", "workshop_id"),
    ("idx_booking_workshop", "booking_transaction", "workshop_id"),
    ("idx_participant_workshop", "workshop_participant", "workshop_id"),
    ("idx_participant_booking", "workshop_participant", "booking_transaction_id"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, column) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Alias::new(table))
                        .col(Alias::new(column))
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, _) in INDEXES {
            manager
                .drop_index(Index::drop().name(name).table(Alias::new(table)).to_owned())
                .await?;
        }
        Ok(())
    }
}
