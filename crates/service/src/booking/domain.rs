use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use models::{booking_transaction, workshop, workshop_participant};

use crate::errors::{self, ServiceError};
use crate::pricing;
use crate::trashed::Trashed;

/// One attendee row of the booking form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ParticipantInput {
    #[validate(length(max = 255, message = "participant name is at most 255 characters"), custom(function = "errors::not_blank"))]
    pub name: String,
    #[validate(length(max = 255, message = "participant occupation is at most 255 characters"), custom(function = "errors::not_blank"))]
    pub occupation: String,
    #[validate(length(max = 255, message = "participant email is at most 255 characters"), custom(function = "errors::not_blank"))]
    pub email: String,
}

impl From<ParticipantInput> for workshop_participant::ParticipantFields {
    fn from(p: ParticipantInput) -> Self {
        Self { name: p.name, occupation: p.occupation, email: p.email }
    }
}

impl From<&workshop_participant::Model> for ParticipantInput {
    fn from(p: &workshop_participant::Model) -> Self {
        Self { name: p.name.clone(), occupation: p.occupation.clone(), email: p.email.clone() }
    }
}

/// A booking form that passed every wizard step.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSubmission {
    pub workshop_id: Uuid,
    pub quantity: u32,
    pub participants: Vec<ParticipantInput>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub customer_bank_name: String,
    pub customer_bank_account: String,
    pub customer_bank_number: String,
    pub booking_trx_id: String,
    pub is_paid: bool,
    pub proof: String,
}

impl BookingSubmission {
    /// Persisted attributes priced from the workshop's current unit price.
    pub fn into_fields(
        self,
        unit_price: Decimal,
    ) -> Result<(booking_transaction::BookingFields, Vec<workshop_participant::ParticipantFields>), ServiceError> {
        let total_amount = pricing::total_amount(unit_price, self.quantity)?;
        let fields = booking_transaction::BookingFields {
            workshop_id: self.workshop_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            customer_bank_name: self.customer_bank_name,
            customer_bank_account: self.customer_bank_account,
            customer_bank_number: self.customer_bank_number,
            booking_trx_id: self.booking_trx_id.trim().to_string(),
            quantity: i32::try_from(self.quantity).unwrap_or(i32::MAX),
            price: unit_price,
            total_amount,
            is_paid: self.is_paid,
            proof: self.proof,
        };
        let participants = self.participants.into_iter().map(Into::into).collect();
        Ok((fields, participants))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingFilter {
    /// customer name or booking transaction id, case-insensitive
    pub search: Option<String>,
    pub workshop_id: Option<Uuid>,
    pub trashed: Trashed,
}

impl BookingFilter {
    pub fn matches(&self, b: &booking_transaction::Model) -> bool {
        if !self.trashed.admits(b.deleted_at.as_ref()) {
            return false;
        }
        if let Some(w) = self.workshop_id {
            if b.workshop_id != w {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => {
                let s = s.to_lowercase();
                b.name.to_lowercase().contains(&s) || b.booking_trx_id.to_lowercase().contains(&s)
            }
            None => true,
        }
    }
}

/// One line of the admin bookings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRow {
    pub id: Uuid,
    pub workshop_id: Uuid,
    pub workshop_name: Option<String>,
    pub workshop_thumbnail: Option<String>,
    pub name: String,
    pub booking_trx_id: String,
    pub is_paid: bool,
    pub quantity: i32,
    pub total_amount: Decimal,
    pub deleted_at: Option<DateTime<FixedOffset>>,
}

impl BookingRow {
    pub fn new(b: booking_transaction::Model, workshop: Option<&workshop::Model>) -> Self {
        Self {
            id: b.id,
            workshop_id: b.workshop_id,
            workshop_name: workshop.map(|w| w.name.clone()),
            workshop_thumbnail: workshop.map(|w| w.thumbnail.clone()),
            name: b.name,
            booking_trx_id: b.booking_trx_id,
            is_paid: b.is_paid,
            quantity: b.quantity,
            total_amount: b.total_amount,
            deleted_at: b.deleted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingDetail {
    #[serde(flatten)]
    pub booking: booking_transaction::Model,
    pub participants: Vec<workshop_participant::Model>,
    pub workshop: Option<workshop::Model>,
}
