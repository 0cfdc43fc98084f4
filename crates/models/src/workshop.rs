use sea_orm::{entity::prelude::*, sea_query::Expr, ActiveValue, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{booking_transaction, category, errors, slug::slugify, workshop_benefit, workshop_instructor, workshop_participant};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "workshop")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub thumbnail: String,
    pub venue_thumbnail: String,
    pub bg_map: String,
    pub address: String,
    #[sea_orm(column_type = "Text")]
    pub about: String,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub price: Decimal,
    pub is_open: bool,
    pub has_started: bool,
    pub started_at: Date,
    pub time_at: Time,
    pub category_id: Uuid,
    pub workshop_instructor_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Category,
    Instructor,
    Benefits,
    Participants,
    Bookings,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
            Relation::Instructor => Entity::belongs_to(workshop_instructor::Entity)
                .from(Column::WorkshopInstructorId)
                .to(workshop_instructor::Column::Id)
                .into(),
            Relation::Benefits => Entity::has_many(workshop_benefit::Entity).into(),
            Relation::Participants => Entity::has_many(workshop_participant::Entity).into(),
            Relation::Bookings => Entity::has_many(booking_transaction::Entity).into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl Related<workshop_instructor::Entity> for Entity {
    fn to() -> RelationDef { Relation::Instructor.def() }
}

impl Related<workshop_benefit::Entity> for Entity {
    fn to() -> RelationDef { Relation::Benefits.def() }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Keeps `slug` in lockstep with `name`: recomputed whenever a name is
    /// written, and never persisted on its own.
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

/// Writable workshop attributes; `slug` is deliberately absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkshopFields {
    pub name: String,
    pub thumbnail: String,
    pub venue_thumbnail: String,
    pub bg_map: String,
    pub address: String,
    pub about: String,
    pub price: Decimal,
    pub is_open: bool,
    pub has_started: bool,
    pub started_at: NaiveDate,
    pub time_at: NaiveTime,
    pub category_id: Uuid,
    pub workshop_instructor_id: Uuid,
}

impl WorkshopFields {
    fn apply(self, am: &mut ActiveModel) {
        am.name = Set(self.name.trim().to_string());
        am.thumbnail = Set(self.thumbnail);
        am.venue_thumbnail = Set(self.venue_thumbnail);
        am.bg_map = Set(self.bg_map);
        am.address = Set(self.address);
        am.about = Set(self.about);
        am.price = Set(self.price);
        am.is_open = Set(self.is_open);
        am.has_started = Set(self.has_started);
        am.started_at = Set(self.started_at);
        am.time_at = Set(self.time_at);
        am.category_id = Set(self.category_id);
        am.workshop_instructor_id = Set(self.workshop_instructor_id);
    }
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("name required".into())); }
    if name.chars().count() > 255 { return Err(errors::ModelError::Validation("name exceeds 255 characters".into())); }
    if slugify(name).is_empty() { return Err(errors::ModelError::Validation("name must contain letters or digits".into())); }
    Ok(())
}

pub fn validate_price(price: Decimal) -> Result<(), errors::ModelError> {
    if price.is_sign_negative() { return Err(errors::ModelError::Validation("price must not be negative".into())); }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, fields: WorkshopFields) -> Result<Model, errors::ModelError> {
    validate_name(&fields.name)?;
    validate_price(fields.price)?;
    let now = Utc::now().into();
    let mut am = ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    };
    fields.apply(&mut am);
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Overwrite every writable attribute of a workshop, trashed or not.
pub async fn update<C: ConnectionTrait>(db: &C, id: Uuid, fields: WorkshopFields) -> Result<Model, errors::ModelError> {
    validate_name(&fields.name)?;
    validate_price(fields.price)?;
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| errors::ModelError::NotFound("workshop not found".into()))?
        .into();
    fields.apply(&mut am);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Mark the given workshops deleted; already-trashed rows are left alone.
pub async fn soft_delete_many<C: ConnectionTrait>(db: &C, ids: &[Uuid]) -> Result<u64, errors::ModelError> {
    if ids.is_empty() { return Ok(0); }
    let now: DateTimeWithTimeZone = Utc::now().into();
    let res = Entity::update_many()
        .col_expr(Column::DeletedAt, Expr::value(now))
        .col_expr(Column::UpdatedAt, Expr::value(now))
        .filter(Column::Id.is_in(ids.iter().copied()))
        .filter(Column::DeletedAt.is_null())
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn restore<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::DeletedAt, Expr::value(Option::<DateTimeWithTimeZone>::None))
        .col_expr(Column::UpdatedAt, Expr::value(DateTimeWithTimeZone::from(Utc::now())))
        .filter(Column::Id.eq(id))
        .filter(Column::DeletedAt.is_not_null())
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}

pub async fn hard_delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
