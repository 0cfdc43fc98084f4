//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_category;
mod m20240601_000002_create_workshop_instructor;
mod m20240601_000003_create_workshop;
mod m20240601_000004_create_workshop_benefit;
mod m20240601_000005_create_booking_transaction;
mod m20240601_000006_create_workshop_participant;
mod m20240601_000007_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_category::Migration),
            Box::new(m20240601_000002_create_workshop_instructor::Migration),
            Box::new(m20240601_000003_create_workshop::Migration),
            Box::new(m20240601_000004_create_workshop_benefit::Migration),
            Box::new(m20240601_000005_create_booking_transaction::Migration),
            Box::new(m20240601_000006_create_workshop_participant::Migration),
            // Indexes should always be applied last
            Box::new(m20240601_000007_add_indexes::Migration),
        ]
    }
}
