use async_trait::async_trait;
use uuid::Uuid;

use models::{category, workshop_instructor};

use super::domain::{CategoryInput, InstructorInput};
use crate::errors::ServiceError;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by name.
    async fn list_categories(&self) -> Result<Vec<category::Model>, ServiceError>;
    async fn find_category_by_id(&self, id: Uuid) -> Result<Option<category::Model>, ServiceError>;
    /// Case-insensitive exact match on the display name.
    async fn find_categories_by_name(&self, name: &str) -> Result<Vec<category::Model>, ServiceError>;
    async fn create_category(&self, input: CategoryInput) -> Result<category::Model, ServiceError>;
}

#[async_trait]
pub trait InstructorRepository: Send + Sync {
    /// All instructors ordered by name.
    async fn list_instructors(&self) -> Result<Vec<workshop_instructor::Model>, ServiceError>;
    async fn find_instructor_by_id(&self, id: Uuid) -> Result<Option<workshop_instructor::Model>, ServiceError>;
    async fn find_instructors_by_name(&self, name: &str) -> Result<Vec<workshop_instructor::Model>, ServiceError>;
    async fn create_instructor(&self, input: InstructorInput) -> Result<workshop_instructor::Model, ServiceError>;
}
