use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    sea_query::{Expr, Func},
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use models::{booking_transaction, workshop, workshop_participant};

use crate::booking::domain::{BookingFilter, BookingRow};
use crate::booking::repository::BookingRepository;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};
use crate::search::contains_pattern;
use crate::trashed::Trashed;

pub struct SeaOrmBookingRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    fn condition(filter: &BookingFilter) -> Condition {
        let mut cond = filter.trashed.condition(booking_transaction::Column::DeletedAt);
        if let Some(w) = filter.workshop_id {
            cond = cond.add(booking_transaction::Column::WorkshopId.eq(w));
        }
        if let Some(s) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let lower = |c: booking_transaction::Column| Expr::expr(Func::lower(Expr::col((booking_transaction::Entity, c))));
            cond = cond.add(
                Condition::any()
                    .add(lower(booking_transaction::Column::Name).like(contains_pattern(s)))
                    .add(lower(booking_transaction::Column::BookingTrxId).like(contains_pattern(s))),
            );
        }
        cond
    }
}

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn list_bookings(&self, filter: &BookingFilter, page: Pagination) -> Result<Page<BookingRow>, ServiceError> {
        let (idx, per) = page.normalize();
        let paginator = booking_transaction::Entity::find()
            .filter(Self::condition(filter))
            .order_by_desc(booking_transaction::Column::CreatedAt)
            .order_by_asc(booking_transaction::Column::Id)
            .paginate(&self.db, per);
        let total = paginator.num_items().await?;
        let bookings = paginator.fetch_page(idx).await?;

        let workshop_ids: Vec<Uuid> = bookings.iter().map(|b| b.workshop_id).collect();
        let workshops: HashMap<Uuid, workshop::Model> = workshop::Entity::find()
            .filter(workshop::Column::Id.is_in(workshop_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|w| (w.id, w))
            .collect();

        let items = bookings
            .into_iter()
            .map(|b| {
                let w = workshops.get(&b.workshop_id);
                BookingRow::new(b, w)
            })
            .collect();
        Ok(Page::new(items, total, page))
    }

    async fn find_booking(&self, id: Uuid, trashed: Trashed) -> Result<Option<booking_transaction::Model>, ServiceError> {
        Ok(booking_transaction::Entity::find_by_id(id)
            .filter(trashed.condition(booking_transaction::Column::DeletedAt))
            .one(&self.db)
            .await?)
    }

    async fn find_booking_by_trx_id(&self, trx_id: &str) -> Result<Option<booking_transaction::Model>, ServiceError> {
        Ok(booking_transaction::find_by_trx_id(&self.db, trx_id).await?)
    }

    async fn list_participants_for_booking(&self, booking_id: Uuid) -> Result<Vec<workshop_participant::Model>, ServiceError> {
        Ok(workshop_participant::list_for_booking(&self.db, booking_id).await?)
    }

    async fn create_booking(
        &self,
        fields: booking_transaction::BookingFields,
        participants: Vec<workshop_participant::ParticipantFields>,
    ) -> Result<booking_transaction::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let created = booking_transaction::create(&txn, fields).await?;
        workshop_participant::replace_for_booking(&txn, created.id, created.workshop_id, &participants).await?;
        txn.commit().await?;
        Ok(created)
    }

    async fn update_booking(
        &self,
        id: Uuid,
        fields: booking_transaction::BookingFields,
        participants: Vec<workshop_participant::ParticipantFields>,
    ) -> Result<booking_transaction::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let updated = booking_transaction::update(&txn, id, fields).await?;
        workshop_participant::replace_for_booking(&txn, id, updated.workshop_id, &participants).await?;
        txn.commit().await?;
        Ok(updated)
    }

    async fn soft_delete_bookings(&self, ids: &[Uuid]) -> Result<u64, ServiceError> {
        Ok(booking_transaction::soft_delete_many(&self.db, ids).await?)
    }

    async fn restore_booking(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(booking_transaction::restore(&self.db, id).await?)
    }

    async fn force_delete_booking(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(booking_transaction::hard_delete(&self.db, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal_macros::dec;

    use super::*;
    use crate::catalog::domain::WorkshopQuery;
    use crate::catalog::repo::seaorm::SeaOrmWorkshopRepository;
    use crate::catalog::repository::WorkshopRepository;
    use crate::reference::domain::{CategoryInput, InstructorInput};
    use crate::reference::repo::seaorm::SeaOrmReferenceRepository;
    use crate::reference::repository::{CategoryRepository, InstructorRepository};
    use crate::mock::fixtures;
    use crate::test_support::get_db;

    fn booking(workshop_id: Uuid, trx: &str, quantity: i32) -> booking_transaction::BookingFields {
        booking_transaction::BookingFields {
            workshop_id,
            name: "Dewi".into(),
            email: "dewi@example.com".into(),
            phone: "0812".into(),
            customer_bank_name: "BCA".into(),
            customer_bank_account: "Dewi".into(),
            customer_bank_number: "001".into(),
            booking_trx_id: trx.into(),
            quantity,
            price: dec!(100),
            total_amount: crate::pricing::total_amount(dec!(100), quantity as u32).unwrap_or_default(),
            is_paid: false,
            proof: "proofs/p.png".into(),
        }
    }

    fn participant(n: &str) -> workshop_participant::ParticipantFields {
        workshop_participant::ParticipantFields { name: n.into(), occupation: "Chef".into(), email: format!("{n}@example.com") }
    }

    #[tokio::test]
    async fn bookings_and_workshop_rows_against_postgres() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let reference = Arc::new(SeaOrmReferenceRepository::new(db.clone()));
        let workshops = SeaOrmWorkshopRepository::new(db.clone());
        let bookings = SeaOrmBookingRepository::new(db.clone());

        let tag = Uuid::new_v4().simple().to_string();
        let cat = reference.create_category(CategoryInput { name: format!("Cat {tag}"), icon: None }).await?;
        let ins = reference
            .create_instructor(InstructorInput { name: format!("Ins {tag}"), occupation: "Chef".into(), avatar: None })
            .await?;
        let (fields, benefits) = fixtures::workshop_input(&format!("Sourdough {tag}"), cat.id, ins.id).split();
        let w = workshops.create_workshop(fields, benefits).await?;

        let trx_live = format!("L{}", &tag[..12]);
        let trx_gone = format!("G{}", &tag[..12]);
        let live = bookings.create_booking(booking(w.id, &trx_live, 2), vec![participant("a"), participant("b")]).await?;
        let gone = bookings.create_booking(booking(w.id, &trx_gone, 1), vec![participant("c")]).await?;
        assert_eq!(bookings.soft_delete_bookings(&[gone.id]).await?, 1);

        let q = WorkshopQuery { search: Some(tag.clone()), ..Default::default() };
        let rows = workshops.list_workshops(&q, Pagination::default()).await?;
        assert_eq!(rows.total, 1);
        assert_eq!(rows.items[0].participants_count, 3);
        assert_eq!(rows.items[0].category_name.as_deref(), Some(cat.name.as_str()));

        let wildcard = WorkshopQuery { search: Some("%".into()), booking_trx_id: Some(trx_live.clone()), ..Default::default() };
        assert_eq!(workshops.list_workshops(&wildcard, Pagination::default()).await?.total, 0);

        let by_trx = WorkshopQuery { booking_trx_id: Some(trx_gone.clone()), ..Default::default() };
        assert_eq!(workshops.list_workshops(&by_trx, Pagination::default()).await?.items[0].id, w.id);

        let filter = BookingFilter { search: Some(trx_live.to_lowercase()), ..Default::default() };
        let page = bookings.list_bookings(&filter, Pagination::default()).await?;
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].workshop_name.as_deref(), Some(w.name.as_str()));

        let roster = bookings.list_participants_for_booking(live.id).await?;
        assert_eq!(roster.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(bookings.find_booking_by_trx_id(&trx_gone).await?.is_some());
        assert!(bookings.find_booking(gone.id, Trashed::Without).await?.is_none());

        assert!(workshops.force_delete_workshop(w.id).await?);
        assert!(bookings.find_booking(live.id, Trashed::With).await?.is_none());
        Ok(())
    }
}
