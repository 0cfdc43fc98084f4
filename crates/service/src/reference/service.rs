use std::sync::Arc;

use tracing::{info, instrument};
use validator::Validate;

use models::{category, workshop_instructor};

use super::domain::{CategoryInput, InstructorInput};
use super::repository::{CategoryRepository, InstructorRepository};
use crate::errors::ServiceError;

/// Category and instructor administration.
pub struct ReferenceService {
    categories: Arc<dyn CategoryRepository>,
    instructors: Arc<dyn InstructorRepository>,
}

impl ReferenceService {
    pub fn new(categories: Arc<dyn CategoryRepository>, instructors: Arc<dyn InstructorRepository>) -> Self {
        Self { categories, instructors }
    }

    pub async fn list_categories(&self) -> Result<Vec<category::Model>, ServiceError> {
        self.categories.list_categories().await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_category(&self, input: CategoryInput) -> Result<category::Model, ServiceError> {
        input.validate()?;
        let created = self.categories.create_category(input).await?;
        info!(id = %created.id, slug = %created.slug, "category_created");
        Ok(created)
    }

    pub async fn list_instructors(&self) -> Result<Vec<workshop_instructor::Model>, ServiceError> {
        self.instructors.list_instructors().await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_instructor(&self, input: InstructorInput) -> Result<workshop_instructor::Model, ServiceError> {
        input.validate()?;
        let created = self.instructors.create_instructor(input).await?;
        info!(id = %created.id, "instructor_created");
        Ok(created)
    }
}
