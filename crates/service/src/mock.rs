//! In-memory repositories for tests and local experiments.
//!
//! [`InMemoryStore`] implements every repository trait over plain vectors and
//! mirrors the database behaviour the services rely on: soft-delete scopes,
//! unique booking ids, cascading force deletes and newest-first ordering.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

use models::errors::ModelError;
use models::slug::slugify;
use models::{booking_transaction, category, workshop, workshop_benefit, workshop_instructor, workshop_participant};

use crate::booking::domain::{BookingFilter, BookingRow};
use crate::booking::repository::BookingRepository;
use crate::catalog::domain::{WorkshopQuery, WorkshopRow};
use crate::catalog::repository::WorkshopRepository;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};
use crate::reference::domain::{CategoryInput, InstructorInput};
use crate::reference::repository::{CategoryRepository, InstructorRepository};
use crate::trashed::Trashed;

#[derive(Default)]
struct Tables {
    categories: Vec<category::Model>,
    instructors: Vec<workshop_instructor::Model>,
    /// insertion order; newest last
    workshops: Vec<workshop::Model>,
    benefits: Vec<workshop_benefit::Model>,
    bookings: Vec<booking_transaction::Model>,
    participants: Vec<workshop_participant::Model>,
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    fail_reads: AtomicBool,
}

fn now() -> DateTimeWithTimeZone {
    Utc::now().into()
}

impl InMemoryStore {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make every list/find call fail with a database error.
    pub fn fail_reads(&self, on: bool) {
        self.fail_reads.store(on, Ordering::SeqCst);
    }

    fn read(&self) -> Result<MutexGuard<'_, Tables>, ServiceError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ServiceError::Db("simulated read failure".into()));
        }
        Ok(self.tables())
    }
}

impl Tables {
    fn participants_count(&self, workshop_id: Uuid) -> u64 {
        self.participants
            .iter()
            .filter(|p| p.workshop_id == workshop_id)
            .count() as u64
    }

    fn workshop_row(&self, w: &workshop::Model) -> WorkshopRow {
        let category = self.categories.iter().find(|c| c.id == w.category_id).map(|c| c.name.clone());
        let instructor = self
            .instructors
            .iter()
            .find(|i| i.id == w.workshop_instructor_id)
            .map(|i| i.name.clone());
        WorkshopRow::new(w.clone(), category, instructor, self.participants_count(w.id))
    }

    fn replace_benefits(&mut self, workshop_id: Uuid, names: &[String]) {
        self.benefits.retain(|b| b.workshop_id != workshop_id);
        let ts = now();
        for (i, name) in names.iter().enumerate() {
            self.benefits.push(workshop_benefit::Model {
                id: Uuid::new_v4(),
                workshop_id,
                name: name.trim().to_string(),
                position: i as i32,
                created_at: ts,
                updated_at: ts,
            });
        }
    }

    fn replace_participants(&mut self, booking_id: Uuid, workshop_id: Uuid, list: &[workshop_participant::ParticipantFields]) {
        self.participants.retain(|p| p.booking_transaction_id != booking_id);
        let ts = now();
        for (i, p) in list.iter().enumerate() {
            self.participants.push(workshop_participant::Model {
                id: Uuid::new_v4(),
                workshop_id,
                booking_transaction_id: booking_id,
                name: p.name.trim().to_string(),
                occupation: p.occupation.trim().to_string(),
                email: p.email.trim().to_string(),
                position: i as i32,
                created_at: ts,
                updated_at: ts,
            });
        }
    }

    fn trx_id_taken(&self, trx_id: &str, except: Option<Uuid>) -> bool {
        self.bookings
            .iter()
            .any(|b| b.booking_trx_id == trx_id.trim() && Some(b.id) != except)
    }
}

fn write_workshop(m: &mut workshop::Model, f: workshop::WorkshopFields) {
    m.name = f.name.trim().to_string();
    m.slug = slugify(&m.name);
    m.thumbnail = f.thumbnail;
    m.venue_thumbnail = f.venue_thumbnail;
    m.bg_map = f.bg_map;
    m.address = f.address;
    m.about = f.about;
    m.price = f.price;
    m.is_open = f.is_open;
    m.has_started = f.has_started;
    m.started_at = f.started_at;
    m.time_at = f.time_at;
    m.category_id = f.category_id;
    m.workshop_instructor_id = f.workshop_instructor_id;
}

fn write_booking(m: &mut booking_transaction::Model, f: booking_transaction::BookingFields) {
    m.workshop_id = f.workshop_id;
    m.name = f.name.trim().to_string();
    m.email = f.email.trim().to_string();
    m.phone = f.phone.trim().to_string();
    m.customer_bank_name = f.customer_bank_name.trim().to_string();
    m.customer_bank_account = f.customer_bank_account.trim().to_string();
    m.customer_bank_number = f.customer_bank_number.trim().to_string();
    m.booking_trx_id = f.booking_trx_id.trim().to_string();
    m.quantity = f.quantity;
    m.price = f.price;
    m.total_amount = f.total_amount;
    m.is_paid = f.is_paid;
    m.proof = f.proof;
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list_categories(&self) -> Result<Vec<category::Model>, ServiceError> {
        let mut all = self.read()?.categories.clone();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_category_by_id(&self, id: Uuid) -> Result<Option<category::Model>, ServiceError> {
        Ok(self.read()?.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_categories_by_name(&self, name: &str) -> Result<Vec<category::Model>, ServiceError> {
        let needle = name.trim().to_lowercase();
        Ok(self.read()?.categories.iter().filter(|c| c.name.to_lowercase() == needle).cloned().collect())
    }

    async fn create_category(&self, input: CategoryInput) -> Result<category::Model, ServiceError> {
        category::validate_name(&input.name)?;
        let mut t = self.tables();
        let name = input.name.trim().to_string();
        let slug = slugify(&name);
        if t.categories.iter().any(|c| c.slug == slug) {
            return Err(ModelError::Db(format!("duplicate category slug '{slug}'")).into());
        }
        let ts = now();
        let created = category::Model { id: Uuid::new_v4(), name, slug, icon: input.icon, created_at: ts, updated_at: ts };
        t.categories.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl InstructorRepository for InMemoryStore {
    async fn list_instructors(&self) -> Result<Vec<workshop_instructor::Model>, ServiceError> {
        let mut all = self.read()?.instructors.clone();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_instructor_by_id(&self, id: Uuid) -> Result<Option<workshop_instructor::Model>, ServiceError> {
        Ok(self.read()?.instructors.iter().find(|i| i.id == id).cloned())
    }

    async fn find_instructors_by_name(&self, name: &str) -> Result<Vec<workshop_instructor::Model>, ServiceError> {
        let needle = name.trim().to_lowercase();
        Ok(self.read()?.instructors.iter().filter(|i| i.name.to_lowercase() == needle).cloned().collect())
    }

    async fn create_instructor(&self, input: InstructorInput) -> Result<workshop_instructor::Model, ServiceError> {
        let ts = now();
        let created = workshop_instructor::Model {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            occupation: input.occupation.trim().to_string(),
            avatar: input.avatar,
            created_at: ts,
            updated_at: ts,
        };
        self.tables().instructors.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl WorkshopRepository for InMemoryStore {
    async fn list_workshops(&self, query: &WorkshopQuery, page: Pagination) -> Result<Page<WorkshopRow>, ServiceError> {
        let t = self.read()?;
        let rows: Vec<WorkshopRow> = t
            .workshops
            .iter()
            .rev()
            .filter(|w| query.matches(w))
            .filter(|w| match &query.booking_trx_id {
                Some(trx) => t.bookings.iter().any(|b| b.workshop_id == w.id && b.booking_trx_id == trx.trim()),
                None => true,
            })
            .map(|w| t.workshop_row(w))
            .collect();
        Ok(Page::slice(rows, page))
    }

    async fn find_workshop(&self, id: Uuid, trashed: Trashed) -> Result<Option<workshop::Model>, ServiceError> {
        Ok(self
            .read()?
            .workshops
            .iter()
            .find(|w| w.id == id && trashed.admits(w.deleted_at.as_ref()))
            .cloned())
    }

    async fn list_benefits_for_workshop(&self, workshop_id: Uuid) -> Result<Vec<workshop_benefit::Model>, ServiceError> {
        let mut list: Vec<_> = self.read()?.benefits.iter().filter(|b| b.workshop_id == workshop_id).cloned().collect();
        list.sort_by_key(|b| b.position);
        Ok(list)
    }

    async fn create_workshop(&self, fields: workshop::WorkshopFields, benefits: Vec<String>) -> Result<workshop::Model, ServiceError> {
        workshop::validate_name(&fields.name)?;
        workshop::validate_price(fields.price)?;
        for b in &benefits {
            workshop_benefit::validate_name(b)?;
        }
        let ts = now();
        let mut m = workshop::Model {
            id: Uuid::new_v4(),
            name: String::new(),
            slug: String::new(),
            thumbnail: String::new(),
            venue_thumbnail: String::new(),
            bg_map: String::new(),
            address: String::new(),
            about: String::new(),
            price: fields.price,
            is_open: false,
            has_started: false,
            started_at: fields.started_at,
            time_at: fields.time_at,
            category_id: fields.category_id,
            workshop_instructor_id: fields.workshop_instructor_id,
            created_at: ts,
            updated_at: ts,
            deleted_at: None,
        };
        write_workshop(&mut m, fields);
        let mut t = self.tables();
        t.workshops.push(m.clone());
        t.replace_benefits(m.id, &benefits);
        Ok(m)
    }

    async fn update_workshop(&self, id: Uuid, fields: workshop::WorkshopFields, benefits: Vec<String>) -> Result<workshop::Model, ServiceError> {
        workshop::validate_name(&fields.name)?;
        workshop::validate_price(fields.price)?;
        for b in &benefits {
            workshop_benefit::validate_name(b)?;
        }
        let mut t = self.tables();
        let m = t
            .workshops
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| ModelError::NotFound("workshop not found".into()))?;
        write_workshop(m, fields);
        m.updated_at = now();
        let updated = m.clone();
        t.replace_benefits(id, &benefits);
        Ok(updated)
    }

    async fn soft_delete_workshops(&self, ids: &[Uuid]) -> Result<u64, ServiceError> {
        let ts = now();
        let mut n = 0;
        for w in self.tables().workshops.iter_mut().filter(|w| ids.contains(&w.id) && w.deleted_at.is_none()) {
            w.deleted_at = Some(ts);
            w.updated_at = ts;
            n += 1;
        }
        Ok(n)
    }

    async fn restore_workshop(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut t = self.tables();
        match t.workshops.iter_mut().find(|w| w.id == id && w.deleted_at.is_some()) {
            Some(w) => {
                w.deleted_at = None;
                w.updated_at = now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn force_delete_workshop(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut t = self.tables();
        let before = t.workshops.len();
        t.workshops.retain(|w| w.id != id);
        if t.workshops.len() == before {
            return Ok(false);
        }
        t.benefits.retain(|b| b.workshop_id != id);
        t.bookings.retain(|b| b.workshop_id != id);
        t.participants.retain(|p| p.workshop_id != id);
        Ok(true)
    }

    async fn list_new_workshops(&self, limit: u64) -> Result<Vec<workshop::Model>, ServiceError> {
        let t = self.read()?;
        Ok(t.workshops
            .iter()
            .rev()
            .filter(|w| w.deleted_at.is_none())
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn list_bookings(&self, filter: &BookingFilter, page: Pagination) -> Result<Page<BookingRow>, ServiceError> {
        let t = self.read()?;
        let workshops: HashMap<Uuid, &workshop::Model> = t.workshops.iter().map(|w| (w.id, w)).collect();
        let rows: Vec<BookingRow> = t
            .bookings
            .iter()
            .rev()
            .filter(|b| filter.matches(b))
            .map(|b| BookingRow::new(b.clone(), workshops.get(&b.workshop_id).copied()))
            .collect();
        Ok(Page::slice(rows, page))
    }

    async fn find_booking(&self, id: Uuid, trashed: Trashed) -> Result<Option<booking_transaction::Model>, ServiceError> {
        Ok(self
            .read()?
            .bookings
            .iter()
            .find(|b| b.id == id && trashed.admits(b.deleted_at.as_ref()))
            .cloned())
    }

    async fn find_booking_by_trx_id(&self, trx_id: &str) -> Result<Option<booking_transaction::Model>, ServiceError> {
        Ok(self.read()?.bookings.iter().find(|b| b.booking_trx_id == trx_id.trim()).cloned())
    }

    async fn list_participants_for_booking(&self, booking_id: Uuid) -> Result<Vec<workshop_participant::Model>, ServiceError> {
        let mut list: Vec<_> = self
            .read()?
            .participants
            .iter()
            .filter(|p| p.booking_transaction_id == booking_id)
            .cloned()
            .collect();
        list.sort_by_key(|p| p.position);
        Ok(list)
    }

    async fn create_booking(
        &self,
        fields: booking_transaction::BookingFields,
        participants: Vec<workshop_participant::ParticipantFields>,
    ) -> Result<booking_transaction::Model, ServiceError> {
        booking_transaction::validate_quantity(fields.quantity)?;
        booking_transaction::validate_trx_id(&fields.booking_trx_id)?;
        for p in &participants {
            workshop_participant::validate(p)?;
        }
        let mut t = self.tables();
        if t.trx_id_taken(&fields.booking_trx_id, None) {
            return Err(ModelError::Db(format!("duplicate booking_trx_id '{}'", fields.booking_trx_id)).into());
        }
        let ts = now();
        let mut m = booking_transaction::Model {
            id: Uuid::new_v4(),
            workshop_id: fields.workshop_id,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            customer_bank_name: String::new(),
            customer_bank_account: String::new(),
            customer_bank_number: String::new(),
            booking_trx_id: String::new(),
            quantity: 0,
            price: fields.price,
            total_amount: fields.total_amount,
            is_paid: false,
            proof: String::new(),
            created_at: ts,
            updated_at: ts,
            deleted_at: None,
        };
        write_booking(&mut m, fields);
        t.bookings.push(m.clone());
        t.replace_participants(m.id, m.workshop_id, &participants);
        Ok(m)
    }

    async fn update_booking(
        &self,
        id: Uuid,
        fields: booking_transaction::BookingFields,
        participants: Vec<workshop_participant::ParticipantFields>,
    ) -> Result<booking_transaction::Model, ServiceError> {
        booking_transaction::validate_quantity(fields.quantity)?;
        booking_transaction::validate_trx_id(&fields.booking_trx_id)?;
        for p in &participants {
            workshop_participant::validate(p)?;
        }
        let mut t = self.tables();
        if t.trx_id_taken(&fields.booking_trx_id, Some(id)) {
            return Err(ModelError::Db(format!("duplicate booking_trx_id '{}'", fields.booking_trx_id)).into());
        }
        let m = t
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| ModelError::NotFound("booking transaction not found".into()))?;
        write_booking(m, fields);
        m.updated_at = now();
        let updated = m.clone();
        t.replace_participants(id, updated.workshop_id, &participants);
        Ok(updated)
    }

    async fn soft_delete_bookings(&self, ids: &[Uuid]) -> Result<u64, ServiceError> {
        let ts = now();
        let mut n = 0;
        for b in self.tables().bookings.iter_mut().filter(|b| ids.contains(&b.id) && b.deleted_at.is_none()) {
            b.deleted_at = Some(ts);
            b.updated_at = ts;
            n += 1;
        }
        Ok(n)
    }

    async fn restore_booking(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut t = self.tables();
        match t.bookings.iter_mut().find(|b| b.id == id && b.deleted_at.is_some()) {
            Some(b) => {
                b.deleted_at = None;
                b.updated_at = now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn force_delete_booking(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut t = self.tables();
        let before = t.bookings.len();
        t.bookings.retain(|b| b.id != id);
        if t.bookings.len() == before {
            return Ok(false);
        }
        t.participants.retain(|p| p.booking_transaction_id != id);
        Ok(true)
    }
}

/// Seed helpers shared by service and router tests.
pub mod fixtures {
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::domain::WorkshopInput;

    pub async fn category(store: &InMemoryStore, name: &str) -> category::Model {
        store
            .create_category(CategoryInput { name: name.into(), icon: None })
            .await
            .unwrap_or_else(|e| panic!("seed category: {e}"))
    }

    pub async fn instructor(store: &InMemoryStore, name: &str) -> workshop_instructor::Model {
        store
            .create_instructor(InstructorInput { name: name.into(), occupation: "Ceramicist".into(), avatar: None })
            .await
            .unwrap_or_else(|e| panic!("seed instructor: {e}"))
    }

    /// One category and one instructor.
    pub async fn reference(store: &InMemoryStore) -> (category::Model, workshop_instructor::Model) {
        (category(store, "Pottery Arts").await, instructor(store, "Rina Hartono").await)
    }

    pub fn workshop_input(name: &str, category_id: Uuid, instructor_id: Uuid) -> WorkshopInput {
        WorkshopInput {
            name: name.into(),
            thumbnail: "thumbnails/w.png".into(),
            venue_thumbnail: "venue_thumbnails/w.png".into(),
            bg_map: "bg_maps/w.png".into(),
            address: "Jl. Kemang Raya 10".into(),
            about: "Hands-on session".into(),
            price: Decimal::new(150_000, 0),
            is_open: true,
            has_started: false,
            started_at: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap_or_default(),
            time_at: NaiveTime::from_hms_opt(9, 30, 0).unwrap_or_default(),
            category_id,
            workshop_instructor_id: instructor_id,
            benefits: Vec::new(),
        }
    }

    /// A live workshop on the first stored category and instructor, seeding them if needed.
    pub async fn workshop(store: &InMemoryStore, name: &str, price: Decimal) -> workshop::Model {
        let existing = {
            let t = store.tables();
            t.categories.first().cloned().zip(t.instructors.first().cloned())
        };
        let (cat, ins) = match existing {
            Some(pair) => pair,
            None => reference(store).await,
        };
        let mut input = workshop_input(name, cat.id, ins.id);
        input.price = price;
        let (fields, benefits) = input.split();
        store
            .create_workshop(fields, benefits)
            .await
            .unwrap_or_else(|e| panic!("seed workshop: {e}"))
    }

    pub async fn set_workshop_price(store: &InMemoryStore, id: Uuid, price: Decimal) {
        if let Some(w) = store.tables().workshops.iter_mut().find(|w| w.id == id) {
            w.price = price;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn participants_count_spans_all_bookings() {
        let store = InMemoryStore::default();
        let w = fixtures::workshop(&store, "Pottery", dec!(10)).await;
        let p = |n: &str| workshop_participant::ParticipantFields { name: n.into(), occupation: "x".into(), email: "e@x".into() };
        let fields = |trx: &str, q: i32| booking_transaction::BookingFields {
            workshop_id: w.id,
            name: "c".into(),
            email: "c@x".into(),
            phone: "1".into(),
            customer_bank_name: "b".into(),
            customer_bank_account: "a".into(),
            customer_bank_number: "n".into(),
            booking_trx_id: trx.into(),
            quantity: q,
            price: dec!(10),
            total_amount: dec!(0),
            is_paid: false,
            proof: "proofs/p.png".into(),
        };
        store.create_booking(fields("T1", 2), vec![p("a"), p("b")]).await.unwrap();
        let gone = store.create_booking(fields("T2", 1), vec![p("c")]).await.unwrap();
        store.soft_delete_bookings(&[gone.id]).await.unwrap();

        let page = store.list_workshops(&WorkshopQuery::default(), Pagination::default()).await.unwrap();
        assert_eq!(page.items[0].participants_count, 3);

        let by_trx = WorkshopQuery { booking_trx_id: Some("T2".into()), ..Default::default() };
        assert_eq!(store.list_workshops(&by_trx, Pagination::default()).await.unwrap().total, 1);
        let none = WorkshopQuery { booking_trx_id: Some("T9".into()), ..Default::default() };
        assert_eq!(store.list_workshops(&none, Pagination::default()).await.unwrap().total, 0);

        assert!(store.create_booking(fields("T1", 0), vec![]).await.is_err());

        assert!(store.force_delete_booking(gone.id).await.unwrap());
        let page = store.list_workshops(&WorkshopQuery::default(), Pagination::default()).await.unwrap();
        assert_eq!(page.items[0].participants_count, 2);
    }
}
