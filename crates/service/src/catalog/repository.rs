use async_trait::async_trait;
use uuid::Uuid;

use models::{workshop, workshop_benefit};

use super::domain::{WorkshopQuery, WorkshopRow};
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};
use crate::trashed::Trashed;

/// Persistence for workshops and their benefits.
#[async_trait]
pub trait WorkshopRepository: Send + Sync {
    /// Newest first.
    async fn list_workshops(&self, query: &WorkshopQuery, page: Pagination) -> Result<Page<WorkshopRow>, ServiceError>;
    async fn find_workshop(&self, id: Uuid, trashed: Trashed) -> Result<Option<workshop::Model>, ServiceError>;
    /// Benefits in their stored order.
    async fn list_benefits_for_workshop(&self, workshop_id: Uuid) -> Result<Vec<workshop_benefit::Model>, ServiceError>;
    async fn create_workshop(&self, fields: workshop::WorkshopFields, benefits: Vec<String>) -> Result<workshop::Model, ServiceError>;
    async fn update_workshop(&self, id: Uuid, fields: workshop::WorkshopFields, benefits: Vec<String>) -> Result<workshop::Model, ServiceError>;
    /// Soft-delete exactly `ids`; returns how many live rows were trashed.
    async fn soft_delete_workshops(&self, ids: &[Uuid]) -> Result<u64, ServiceError>;
    async fn restore_workshop(&self, id: Uuid) -> Result<bool, ServiceError>;
    /// Removes the row with its benefits, bookings and participants.
    async fn force_delete_workshop(&self, id: Uuid) -> Result<bool, ServiceError>;
    /// Live workshops, newest first.
    async fn list_new_workshops(&self, limit: u64) -> Result<Vec<workshop::Model>, ServiceError>;
}
