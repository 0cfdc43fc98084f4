use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, workshop};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "workshop_benefit")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub workshop_id: Uuid,
    pub name: String,
    pub position: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Workshop }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Workshop => Entity::belongs_to(workshop::Entity)
                .from(Column::WorkshopId)
                .to(workshop::Column::Id)
                .into(),
        }
    }
}

impl Related<workshop::Entity> for Entity {
    fn to() -> RelationDef { Relation::Workshop.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("benefit name required".into())); }
    if name.chars().count() > 255 { return Err(errors::ModelError::Validation("benefit name exceeds 255 characters".into())); }
    Ok(())
}

/// Replace the benefit set of a workshop, preserving the given order.
pub async fn replace_for_workshop<C: ConnectionTrait>(db: &C, workshop_id: Uuid, names: &[String]) -> Result<Vec<Model>, errors::ModelError> {
    for n in names { validate_name(n)?; }
    Entity::delete_many().filter(Column::WorkshopId.eq(workshop_id)).exec(db).await?;
    let now = Utc::now().into();
    let mut out = Vec::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        let am = ActiveModel {
            id: Set(Uuid::new_v4()),
            workshop_id: Set(workshop_id),
            name: Set(name.trim().to_string()),
            position: Set(i as i32),
            created_at: Set(now),
            updated_at: Set(now),
        };
        out.push(am.insert(db).await?);
    }
    Ok(out)
}

pub async fn list_for_workshop<C: ConnectionTrait>(db: &C, workshop_id: Uuid) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find()
        .filter(Column::WorkshopId.eq(workshop_id))
        .order_by_asc(Column::Position)
        .all(db)
        .await?;
    Ok(rows)
}
