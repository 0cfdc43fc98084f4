use async_trait::async_trait;
use sea_orm::{sea_query::Func, sea_query::Expr, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use models::{category, workshop_instructor};

use crate::errors::ServiceError;
use crate::reference::domain::{CategoryInput, InstructorInput};
use crate::reference::repository::{CategoryRepository, InstructorRepository};

pub struct SeaOrmReferenceRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmReferenceRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl CategoryRepository for SeaOrmReferenceRepository {
    async fn list_categories(&self) -> Result<Vec<category::Model>, ServiceError> {
        Ok(category::Entity::find().order_by_asc(category::Column::Name).all(&self.db).await?)
    }

    async fn find_category_by_id(&self, id: Uuid) -> Result<Option<category::Model>, ServiceError> {
        Ok(category::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_categories_by_name(&self, name: &str) -> Result<Vec<category::Model>, ServiceError> {
        let rows = category::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(category::Column::Name))).eq(name.trim().to_lowercase()))
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn create_category(&self, input: CategoryInput) -> Result<category::Model, ServiceError> {
        Ok(category::create(&self.db, &input.name, input.icon.as_deref()).await?)
    }
}

#[async_trait]
impl InstructorRepository for SeaOrmReferenceRepository {
    async fn list_instructors(&self) -> Result<Vec<workshop_instructor::Model>, ServiceError> {
        Ok(workshop_instructor::Entity::find()
            .order_by_asc(workshop_instructor::Column::Name)
            .all(&self.db)
            .await?)
    }

    async fn find_instructor_by_id(&self, id: Uuid) -> Result<Option<workshop_instructor::Model>, ServiceError> {
        Ok(workshop_instructor::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_instructors_by_name(&self, name: &str) -> Result<Vec<workshop_instructor::Model>, ServiceError> {
        let rows = workshop_instructor::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(workshop_instructor::Column::Name))).eq(name.trim().to_lowercase()))
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn create_instructor(&self, input: InstructorInput) -> Result<workshop_instructor::Model, ServiceError> {
        Ok(workshop_instructor::create(&self.db, &input.name, &input.occupation, input.avatar.as_deref()).await?)
    }
}
