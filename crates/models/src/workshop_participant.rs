use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{booking_transaction, errors, workshop};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "workshop_participant")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub workshop_id: Uuid,
    pub booking_transaction_id: Uuid,
    pub name: String,
    pub occupation: String,
    pub email: String,
    pub position: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Workshop, BookingTransaction }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Workshop => Entity::belongs_to(workshop::Entity)
                .from(Column::WorkshopId)
                .to(workshop::Column::Id)
                .into(),
            Relation::BookingTransaction => Entity::belongs_to(booking_transaction::Entity)
                .from(Column::BookingTransactionId)
                .to(booking_transaction::Column::Id)
                .into(),
        }
    }
}

impl Related<workshop::Entity> for Entity {
    fn to() -> RelationDef { Relation::Workshop.def() }
}

impl Related<booking_transaction::Entity> for Entity {
    fn to() -> RelationDef { Relation::BookingTransaction.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Attendee data as entered on the booking form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantFields {
    pub name: String,
    pub occupation: String,
    pub email: String,
}

pub fn validate(p: &ParticipantFields) -> Result<(), errors::ModelError> {
    for (field, value) in [("name", &p.name), ("occupation", &p.occupation), ("email", &p.email)] {
        if value.trim().is_empty() {
            return Err(errors::ModelError::Validation(format!("participant {field} required")));
        }
        if value.chars().count() > 255 {
            return Err(errors::ModelError::Validation(format!("participant {field} exceeds 255 characters")));
        }
    }
    Ok(())
}

/// Replace the roster of a booking; positions follow slice order.
pub async fn replace_for_booking<C: ConnectionTrait>(
    db: &C,
    booking_transaction_id: Uuid,
    workshop_id: Uuid,
    participants: &[ParticipantFields],
) -> Result<Vec<Model>, errors::ModelError> {
    for p in participants { validate(p)?; }
    Entity::delete_many()
        .filter(Column::BookingTransactionId.eq(booking_transaction_id))
        .exec(db)
        .await?;
    let now = Utc::now().into();
    let mut out = Vec::with_capacity(participants.len());
    for (i, p) in participants.iter().enumerate() {
        let am = ActiveModel {
            id: Set(Uuid::new_v4()),
            workshop_id: Set(workshop_id),
            booking_transaction_id: Set(booking_transaction_id),
            name: Set(p.name.trim().to_string()),
            occupation: Set(p.occupation.trim().to_string()),
            email: Set(p.email.trim().to_string()),
            position: Set(i as i32),
            created_at: Set(now),
            updated_at: Set(now),
        };
        out.push(am.insert(db).await?);
    }
    Ok(out)
}

pub async fn list_for_booking<C: ConnectionTrait>(db: &C, booking_transaction_id: Uuid) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find()
        .filter(Column::BookingTransactionId.eq(booking_transaction_id))
        .order_by_asc(Column::Position)
        .all(db)
        .await?;
    Ok(rows)
}
