use sea_orm::{entity::prelude::*, ActiveValue, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, slug::slugify, workshop};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Workshop }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Workshop => Entity::has_many(workshop::Entity).into() }
    }
}

impl Related<workshop::Entity> for Entity {
    fn to() -> RelationDef { Relation::Workshop.def() }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        match &self.name {
            ActiveValue::Set(name) => {
                let slug = slugify(name);
                self.slug = Set(slug);
            }
            _ => self.slug = ActiveValue::NotSet,
        }
        Ok(self)
    }
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("name required".into())); }
    if name.chars().count() > 255 { return Err(errors::ModelError::Validation("name exceeds 255 characters".into())); }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, name: &str, icon: Option<&str>) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.trim().to_string()),
        slug: ActiveValue::NotSet,
        icon: Set(icon.map(str::to_string)),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
