use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    sea_query::{Expr, Func},
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, TransactionTrait,
};
use uuid::Uuid;

use models::{booking_transaction, category, workshop, workshop_benefit, workshop_instructor, workshop_participant};

use crate::catalog::domain::{WorkshopQuery, WorkshopRow};
use crate::catalog::repository::WorkshopRepository;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};
use crate::search::contains_pattern;
use crate::trashed::Trashed;

pub struct SeaOrmWorkshopRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmWorkshopRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    fn condition(query: &WorkshopQuery) -> Condition {
        let mut cond = query.trashed.condition(workshop::Column::DeletedAt);
        if let Some(s) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
            cond = cond.add(Expr::expr(Func::lower(Expr::col((workshop::Entity, workshop::Column::Name)))).like(contains_pattern(s)));
        }
        if let Some(ids) = &query.category_ids {
            cond = cond.add(workshop::Column::CategoryId.is_in(ids.clone()));
        }
        if let Some(ids) = &query.instructor_ids {
            cond = cond.add(workshop::Column::WorkshopInstructorId.is_in(ids.clone()));
        }
        if let Some(trx) = &query.booking_trx_id {
            let having_booking = booking_transaction::Entity::find()
                .select_only()
                .column(booking_transaction::Column::WorkshopId)
                .filter(booking_transaction::Column::BookingTrxId.eq(trx.trim()))
                .into_query();
            cond = cond.add(workshop::Column::Id.in_subquery(having_booking));
        }
        cond
    }

    /// Participant rows per workshop, across all of its bookings.
    async fn participant_counts(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, u64>, ServiceError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<(Uuid, i64)> = workshop_participant::Entity::find()
            .select_only()
            .column(workshop_participant::Column::WorkshopId)
            .column_as(Expr::col((workshop_participant::Entity, workshop_participant::Column::Id)).count(), "participants")
            .filter(workshop_participant::Column::WorkshopId.is_in(ids.to_vec()))
            .group_by(workshop_participant::Column::WorkshopId)
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|(id, n)| (id, n.max(0) as u64)).collect())
    }
}

#[async_trait]
impl WorkshopRepository for SeaOrmWorkshopRepository {
    async fn list_workshops(&self, query: &WorkshopQuery, page: Pagination) -> Result<Page<WorkshopRow>, ServiceError> {
        let (idx, per) = page.normalize();
        let paginator = workshop::Entity::find()
            .filter(Self::condition(query))
            .order_by_desc(workshop::Column::CreatedAt)
            .order_by_asc(workshop::Column::Id)
            .paginate(&self.db, per);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(idx).await?;

        let ids: Vec<Uuid> = models.iter().map(|w| w.id).collect();
        let category_ids: Vec<Uuid> = models.iter().map(|w| w.category_id).collect();
        let instructor_ids: Vec<Uuid> = models.iter().map(|w| w.workshop_instructor_id).collect();

        let categories: HashMap<Uuid, String> = category::Entity::find()
            .filter(category::Column::Id.is_in(category_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();
        let instructors: HashMap<Uuid, String> = workshop_instructor::Entity::find()
            .filter(workshop_instructor::Column::Id.is_in(instructor_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|i| (i.id, i.name))
            .collect();
        let counts = self.participant_counts(&ids).await?;

        let items = models
            .into_iter()
            .map(|w| {
                let category = categories.get(&w.category_id).cloned();
                let instructor = instructors.get(&w.workshop_instructor_id).cloned();
                let count = counts.get(&w.id).copied().unwrap_or(0);
                WorkshopRow::new(w, category, instructor, count)
            })
            .collect();
        Ok(Page::new(items, total, page))
    }

    async fn find_workshop(&self, id: Uuid, trashed: Trashed) -> Result<Option<workshop::Model>, ServiceError> {
        let found = workshop::Entity::find_by_id(id)
            .filter(trashed.condition(workshop::Column::DeletedAt))
            .one(&self.db)
            .await?;
        Ok(found)
    }

    async fn list_benefits_for_workshop(&self, workshop_id: Uuid) -> Result<Vec<workshop_benefit::Model>, ServiceError> {
        Ok(workshop_benefit::list_for_workshop(&self.db, workshop_id).await?)
    }

    async fn create_workshop(&self, fields: workshop::WorkshopFields, benefits: Vec<String>) -> Result<workshop::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let created = workshop::create(&txn, fields).await?;
        workshop_benefit::replace_for_workshop(&txn, created.id, &benefits).await?;
        txn.commit().await?;
        Ok(created)
    }

    async fn update_workshop(&self, id: Uuid, fields: workshop::WorkshopFields, benefits: Vec<String>) -> Result<workshop::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let updated = workshop::update(&txn, id, fields).await?;
        workshop_benefit::replace_for_workshop(&txn, id, &benefits).await?;
        txn.commit().await?;
        Ok(updated)
    }

    async fn soft_delete_workshops(&self, ids: &[Uuid]) -> Result<u64, ServiceError> {
        Ok(workshop::soft_delete_many(&self.db, ids).await?)
    }

    async fn restore_workshop(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(workshop::restore(&self.db, id).await?)
    }

    async fn force_delete_workshop(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(workshop::hard_delete(&self.db, id).await?)
    }

    async fn list_new_workshops(&self, limit: u64) -> Result<Vec<workshop::Model>, ServiceError> {
        let rows = workshop::Entity::find()
            .filter(workshop::Column::DeletedAt.is_null())
            .order_by_desc(workshop::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows)
    }
}
