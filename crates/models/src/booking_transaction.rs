use sea_orm::{entity::prelude::*, sea_query::Expr, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors, workshop, workshop_participant};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking_transaction")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub workshop_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub customer_bank_name: String,
    pub customer_bank_account: String,
    pub customer_bank_number: String,
    #[sea_orm(unique)]
    pub booking_trx_id: String,
    pub quantity: i32,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub price: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub total_amount: Decimal,
    pub is_paid: bool,
    pub proof: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Workshop, Participants }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Workshop => Entity::belongs_to(workshop::Entity)
                .from(Column::WorkshopId)
                .to(workshop::Column::Id)
                .into(),
            Relation::Participants => Entity::has_many(workshop_participant::Entity).into(),
        }
    }
}

impl Related<workshop::Entity> for Entity {
    fn to() -> RelationDef { Relation::Workshop.def() }
}

impl Related<workshop_participant::Entity> for Entity {
    fn to() -> RelationDef { Relation::Participants.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Persisted booking attributes. `price` and `total_amount` are expected to
/// be derived by the caller from the workshop price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookingFields {
    pub workshop_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub customer_bank_name: String,
    pub customer_bank_account: String,
    pub customer_bank_number: String,
    pub booking_trx_id: String,
    pub quantity: i32,
    pub price: Decimal,
    pub total_amount: Decimal,
    pub is_paid: bool,
    pub proof: String,
}

impl BookingFields {
    fn apply(self, am: &mut ActiveModel) {
        am.workshop_id = Set(self.workshop_id);
        am.name = Set(self.name.trim().to_string());
        am.email = Set(self.email.trim().to_string());
        am.phone = Set(self.phone.trim().to_string());
        am.customer_bank_name = Set(self.customer_bank_name.trim().to_string());
        am.customer_bank_account = Set(self.customer_bank_account.trim().to_string());
        am.customer_bank_number = Set(self.customer_bank_number.trim().to_string());
        am.booking_trx_id = Set(self.booking_trx_id.trim().to_string());
        am.quantity = Set(self.quantity);
        am.price = Set(self.price);
        am.total_amount = Set(self.total_amount);
        am.is_paid = Set(self.is_paid);
        am.proof = Set(self.proof);
    }
}

pub fn validate_quantity(quantity: i32) -> Result<(), errors::ModelError> {
    if quantity < 0 { return Err(errors::ModelError::Validation("quantity must not be negative".into())); }
    Ok(())
}

pub fn validate_trx_id(trx_id: &str) -> Result<(), errors::ModelError> {
    let t = trx_id.trim();
    if t.is_empty() { return Err(errors::ModelError::Validation("booking_trx_id required".into())); }
    if t.chars().count() > 255 { return Err(errors::ModelError::Validation("booking_trx_id exceeds 255 characters".into())); }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, fields: BookingFields) -> Result<Model, errors::ModelError> {
    validate_quantity(fields.quantity)?;
    validate_trx_id(&fields.booking_trx_id)?;
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

pub async fn update<C: ConnectionTrait>(db: &C, id: Uuid, fields: BookingFields) -> Result<Model, errors::ModelError> {
    validate_quantity(fields.quantity)?;
    validate_trx_id(&fields.booking_trx_id)?;
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| errors::ModelError::NotFound("booking transaction not found".into()))?
        .into();
    fields.apply(&mut am);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_trx_id<C: ConnectionTrait>(db: &C, trx_id: &str) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find().filter(Column::BookingTrxId.eq(trx_id.trim())).one(db).await?)
}

/// Mark exactly the given bookings deleted; already-trashed rows are left alone.
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
