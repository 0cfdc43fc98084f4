use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use common::types::SelectOption;

use super::domain::{FilterOptions, WorkshopDetail, WorkshopFilter, WorkshopInput, WorkshopQuery, WorkshopRow};
use super::repository::WorkshopRepository;
use crate::errors::{FieldErrors, ServiceError};
use crate::pagination::{Page, Pagination};
use crate::reference::repository::{CategoryRepository, InstructorRepository};
use crate::trashed::Trashed;

/// Workshop administration on top of the catalog and reference repositories.
pub struct WorkshopService {
    workshops: Arc<dyn WorkshopRepository>,
    categories: Arc<dyn CategoryRepository>,
    instructors: Arc<dyn InstructorRepository>,
}

/// Intersect an explicit id filter with ids resolved from a display name.
fn narrow(explicit: Option<Uuid>, by_name: Option<Vec<Uuid>>) -> Option<Vec<Uuid>> {
    match (explicit, by_name) {
        (None, None) => None,
        (Some(id), None) => Some(vec![id]),
        (None, Some(ids)) => Some(ids),
        (Some(id), Some(ids)) => Some(ids.into_iter().filter(|x| *x == id).collect()),
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl WorkshopService {
    pub fn new(
        workshops: Arc<dyn WorkshopRepository>,
        categories: Arc<dyn CategoryRepository>,
        instructors: Arc<dyn InstructorRepository>,
    ) -> Self {
        Self { workshops, categories, instructors }
    }

    /// Filtered, paginated admin table.
    #[instrument(skip(self, filter))]
    pub async fn list(&self, filter: WorkshopFilter, page: Pagination) -> Result<Page<WorkshopRow>, ServiceError> {
        let category_names = match non_blank(filter.category) {
            Some(name) => Some(self.categories.find_categories_by_name(&name).await?.into_iter().map(|c| c.id).collect()),
            None => None,
        };
        let instructor_names = match non_blank(filter.instructor) {
            Some(name) => Some(self.instructors.find_instructors_by_name(&name).await?.into_iter().map(|i| i.id).collect()),
            None => None,
        };
        let query = WorkshopQuery {
            search: non_blank(filter.search),
            category_ids: narrow(filter.category_id, category_names),
            instructor_ids: narrow(filter.instructor_id, instructor_names),
            booking_trx_id: non_blank(filter.booking_trx_id),
            trashed: filter.trashed,
        };
        let unmatched = |ids: &Option<Vec<Uuid>>| ids.as_ref().is_some_and(|v| v.is_empty());
        if unmatched(&query.category_ids) || unmatched(&query.instructor_ids) {
            return Ok(Page::empty(page));
        }
        self.workshops.list_workshops(&query, page).await
    }

    /// Detail view; trashed workshops stay viewable so they can be restored.
    pub async fn get(&self, id: Uuid) -> Result<WorkshopDetail, ServiceError> {
        let workshop = self
            .workshops
            .find_workshop(id, Trashed::With)
            .await?
            .ok_or_else(|| ServiceError::not_found("workshop"))?;
        let benefits = self.workshops.list_benefits_for_workshop(id).await?;
        let category = self.categories.find_category_by_id(workshop.category_id).await?;
        let instructor = self.instructors.find_instructor_by_id(workshop.workshop_instructor_id).await?;
        Ok(WorkshopDetail { workshop, benefits, category, instructor })
    }

    async fn check(&self, input: &WorkshopInput) -> Result<(), ServiceError> {
        let mut errors = match input.validate() {
            Ok(()) => FieldErrors::default(),
            Err(e) => FieldErrors::from(&e),
        };
        if self.categories.find_category_by_id(input.category_id).await?.is_none() {
            errors.add("category_id", "selected category does not exist");
        }
        if self.instructors.find_instructor_by_id(input.workshop_instructor_id).await?.is_none() {
            errors.add("workshop_instructor_id", "selected instructor does not exist");
        }
        errors.into_result()
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: WorkshopInput) -> Result<WorkshopDetail, ServiceError> {
        self.check(&input).await?;
        let (fields, benefits) = input.split();
        let created = self.workshops.create_workshop(fields, benefits).await?;
        info!(id = %created.id, slug = %created.slug, "workshop_created");
        self.get(created.id).await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn update(&self, id: Uuid, input: WorkshopInput) -> Result<WorkshopDetail, ServiceError> {
        if self.workshops.find_workshop(id, Trashed::With).await?.is_none() {
            return Err(ServiceError::not_found("workshop"));
        }
        self.check(&input).await?;
        let (fields, benefits) = input.split();
        let updated = self.workshops.update_workshop(id, fields, benefits).await?;
        info!(id = %updated.id, slug = %updated.slug, "workshop_updated");
        self.get(id).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.workshops.soft_delete_workshops(&[id]).await? == 0 {
            return Err(ServiceError::not_found("workshop"));
        }
        info!(%id, "workshop_soft_deleted");
        Ok(())
    }

    #[instrument(skip(self, ids), fields(selected = ids.len()))]
    pub async fn bulk_delete(&self, ids: &[Uuid]) -> Result<u64, ServiceError> {
        let n = self.workshops.soft_delete_workshops(ids).await?;
        info!(deleted = n, "workshops_bulk_soft_deleted");
        Ok(n)
    }

    #[instrument(skip(self))]
    pub async fn restore(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.workshops.restore_workshop(id).await? {
            return Err(ServiceError::not_found("trashed workshop"));
        }
        info!(%id, "workshop_restored");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn force_delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.workshops.force_delete_workshop(id).await? {
            return Err(ServiceError::not_found("workshop"));
        }
        info!(%id, "workshop_force_deleted");
        Ok(())
    }

    pub async fn filter_options(&self) -> Result<FilterOptions, ServiceError> {
        let categories = self.categories.list_categories().await?;
        let instructors = self.instructors.list_instructors().await?;
        Ok(FilterOptions {
            categories: categories.into_iter().map(|c| SelectOption { id: c.id, name: c.name }).collect(),
            instructors: instructors.into_iter().map(|i| SelectOption { id: i.id, name: i.name }).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::domain::BenefitInput;
    use crate::mock::{fixtures, InMemoryStore};
    use rust_decimal_macros::dec;

    fn service(store: &Arc<InMemoryStore>) -> WorkshopService {
        WorkshopService::new(store.clone(), store.clone(), store.clone())
    }

    #[tokio::test]
    async fn create_derives_slug_and_keeps_benefit_order() {
        let store = Arc::new(InMemoryStore::default());
        let (cat, ins) = fixtures::reference(&store).await;
        let mut input = fixtures::workshop_input("Intro to Pottery!!", cat.id, ins.id);
        input.benefits = vec![BenefitInput { name: "Clay".into() }, BenefitInput { name: "Kiln time".into() }];

        let detail = service(&store).create(input).await.unwrap();
        assert_eq!(detail.workshop.slug, "intro-to-pottery");
        let names: Vec<_> = detail.benefits.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Clay", "Kiln time"]);
        assert_eq!(detail.category.unwrap().id, cat.id);
    }

    #[tokio::test]
    async fn create_rejects_unknown_references_and_negative_price() {
        let store = Arc::new(InMemoryStore::default());
        let mut input = fixtures::workshop_input("Ghost", Uuid::new_v4(), Uuid::new_v4());
        input.price = dec!(-5);
        match service(&store).create(input).await {
            Err(ServiceError::Invalid(fields)) => {
                assert!(fields.contains("category_id"));
                assert!(fields.contains("workshop_instructor_id"));
                assert!(fields.contains("price"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_renames_slug_and_replaces_benefits() {
        let store = Arc::new(InMemoryStore::default());
        let (cat, ins) = fixtures::reference(&store).await;
        let svc = service(&store);
        let mut input = fixtures::workshop_input("Old Name", cat.id, ins.id);
        input.benefits = vec![BenefitInput { name: "A".into() }];
        let created = svc.create(input.clone()).await.unwrap();

        input.name = "Brand New @ Studio".into();
        input.benefits = vec![BenefitInput { name: "B".into() }, BenefitInput { name: "C".into() }];
        let updated = svc.update(created.workshop.id, input).await.unwrap();
        assert_eq!(updated.workshop.slug, "brand-new-at-studio");
        assert_eq!(updated.benefits.len(), 2);
        assert_eq!(updated.benefits[0].name, "B");
    }

    #[tokio::test]
    async fn soft_deleted_hidden_by_default_visible_with_trashed() {
        let store = Arc::new(InMemoryStore::default());
        let (cat, ins) = fixtures::reference(&store).await;
        let svc = service(&store);
        let keep = svc.create(fixtures::workshop_input("Keep", cat.id, ins.id)).await.unwrap();
        let gone = svc.create(fixtures::workshop_input("Gone", cat.id, ins.id)).await.unwrap();
        svc.delete(gone.workshop.id).await.unwrap();

        let default = svc.list(WorkshopFilter::default(), Pagination::default()).await.unwrap();
        assert_eq!(default.items.iter().map(|r| r.id).collect::<Vec<_>>(), vec![keep.workshop.id]);

        let with = WorkshopFilter { trashed: Trashed::With, ..Default::default() };
        assert_eq!(svc.list(with, Pagination::default()).await.unwrap().total, 2);

        let only = WorkshopFilter { trashed: Trashed::Only, ..Default::default() };
        let only = svc.list(only, Pagination::default()).await.unwrap();
        assert_eq!(only.items.len(), 1);
        assert!(only.items[0].deleted_at.is_some());

        svc.restore(gone.workshop.id).await.unwrap();
        assert_eq!(svc.list(WorkshopFilter::default(), Pagination::default()).await.unwrap().total, 2);
        assert!(matches!(svc.restore(gone.workshop.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn filters_by_search_and_reference_names() {
        let store = Arc::new(InMemoryStore::default());
        let (cat, ins) = fixtures::reference(&store).await;
        let other_cat = fixtures::category(&store, "Cooking").await;
        let svc = service(&store);
        svc.create(fixtures::workshop_input("Wheel Throwing", cat.id, ins.id)).await.unwrap();
        svc.create(fixtures::workshop_input("Bread Basics", other_cat.id, ins.id)).await.unwrap();

        let by_search = WorkshopFilter { search: Some("wheel".into()), ..Default::default() };
        assert_eq!(svc.list(by_search, Pagination::default()).await.unwrap().items[0].name, "Wheel Throwing");

        let by_name = WorkshopFilter { category: Some("cooking".into()), ..Default::default() };
        let rows = svc.list(by_name, Pagination::default()).await.unwrap();
        assert_eq!(rows.total, 1);
        assert_eq!(rows.items[0].category_name.as_deref(), Some("Cooking"));

        let unknown = WorkshopFilter { instructor: Some("Nobody".into()), ..Default::default() };
        assert_eq!(svc.list(unknown, Pagination::default()).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn force_delete_removes_row() {
        let store = Arc::new(InMemoryStore::default());
        let (cat, ins) = fixtures::reference(&store).await;
        let svc = service(&store);
        let w = svc.create(fixtures::workshop_input("Temp", cat.id, ins.id)).await.unwrap();
        svc.force_delete(w.workshop.id).await.unwrap();
        assert!(matches!(svc.get(w.workshop.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn filter_options_list_reference_pairs() {
        let store = Arc::new(InMemoryStore::default());
        let (cat, ins) = fixtures::reference(&store).await;
        let opts = service(&store).filter_options().await.unwrap();
        assert_eq!(opts.categories, vec![SelectOption { id: cat.id, name: cat.name }]);
        assert_eq!(opts.instructors, vec![SelectOption { id: ins.id, name: ins.name }]);
    }
}
