//! Booking form view-model.
//!
//! The admin UI keeps one [`BookingForm`] per edit session and reports field
//! changes as [`FormEvent`]s. Derived values (unit price, total, participant
//! rows) are recomputed here so every client shows the same numbers.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use models::{booking_transaction, workshop_participant};

use super::domain::{BookingSubmission, ParticipantInput};
use crate::errors::{self, FieldErrors, ServiceError};
use crate::pricing;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingForm {
    pub workshop_id: Option<Uuid>,
    /// unit price of the selected workshop; read-only
    pub price: Decimal,
    pub quantity: u32,
    /// read-only, tax included
    pub total_amount: Decimal,
    pub participants: Vec<ParticipantInput>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub customer_bank_name: String,
    pub customer_bank_account: String,
    pub customer_bank_number: String,
    pub booking_trx_id: String,
    /// `None` until staff picks yes or no
    pub is_paid: Option<bool>,
    pub proof: Option<String>,
}

/// Field changes that trigger recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormEvent {
    /// `None` clears the selection.
    WorkshopSelected { workshop_id: Option<Uuid> },
    QuantityChanged { quantity: u32 },
    /// The form was loaded from stored data.
    Hydrated,
}

/// Most participants a single booking can carry.
pub const MAX_QUANTITY: u32 = 100;

fn quantity_message() -> String {
    format!("at most {MAX_QUANTITY} participants per booking")
}

fn check_quantity(quantity: u32) -> Result<(), ServiceError> {
    if quantity > MAX_QUANTITY {
        let mut errors = FieldErrors::default();
        errors.add("quantity", quantity_message());
        return Err(ServiceError::Invalid(errors));
    }
    Ok(())
}

/// Grow with blank rows or truncate so that `participants.len() == target`.
/// Rows below the smaller of the two lengths are left untouched.
pub fn sync_participants(participants: &mut Vec<ParticipantInput>, target: usize) {
    if participants.len() < target {
        participants.resize_with(target, ParticipantInput::default);
    } else {
        participants.truncate(target);
    }
}

impl BookingForm {
    pub fn blank(booking_trx_id: String) -> Self {
        Self { booking_trx_id, ..Default::default() }
    }

    /// Form state for editing a stored booking. Derived values are left as
    /// stored; send [`FormEvent::Hydrated`] to re-price.
    pub fn from_record(b: &booking_transaction::Model, participants: &[workshop_participant::Model]) -> Self {
        Self {
            workshop_id: Some(b.workshop_id),
            price: b.price,
            quantity: u32::try_from(b.quantity).unwrap_or(0),
            total_amount: b.total_amount,
            participants: participants.iter().map(ParticipantInput::from).collect(),
            name: b.name.clone(),
            email: b.email.clone(),
            phone: b.phone.clone(),
            customer_bank_name: b.customer_bank_name.clone(),
            customer_bank_account: b.customer_bank_account.clone(),
            customer_bank_number: b.customer_bank_number.clone(),
            booking_trx_id: b.booking_trx_id.clone(),
            is_paid: Some(b.is_paid),
            proof: Some(b.proof.clone()).filter(|p| !p.is_empty()),
        }
    }

    /// Apply `event`. `workshop_price` is the current price of the form's
    /// workshop (the newly selected one for [`FormEvent::WorkshopSelected`]);
    /// `None` means unknown and prices the form at zero. The `price` sent
    /// back by the client is never used.
    pub fn apply(&mut self, event: FormEvent, workshop_price: Option<Decimal>) -> Result<(), ServiceError> {
        match event {
            FormEvent::WorkshopSelected { workshop_id } => self.select_workshop(workshop_id, workshop_price),
            FormEvent::QuantityChanged { quantity } => self.set_quantity(workshop_price.unwrap_or(Decimal::ZERO), quantity),
            FormEvent::Hydrated => self.hydrate(workshop_price),
        }
    }

    pub fn select_workshop(&mut self, workshop_id: Option<Uuid>, workshop_price: Option<Decimal>) -> Result<(), ServiceError> {
        self.reprice(workshop_price.unwrap_or(Decimal::ZERO), self.quantity)?;
        self.workshop_id = workshop_id;
        Ok(())
    }

    /// Resize the roster at the form's current unit price.
    pub fn change_quantity(&mut self, quantity: u32) -> Result<(), ServiceError> {
        self.set_quantity(self.price, quantity)
    }

    fn set_quantity(&mut self, price: Decimal, quantity: u32) -> Result<(), ServiceError> {
        check_quantity(quantity)?;
        self.reprice(price, quantity)?;
        self.quantity = quantity;
        sync_participants(&mut self.participants, quantity as usize);
        Ok(())
    }

    /// Stored participant rows are kept as they are.
    pub fn hydrate(&mut self, workshop_price: Option<Decimal>) -> Result<(), ServiceError> {
        self.reprice(workshop_price.unwrap_or(Decimal::ZERO), self.quantity)
    }

    /// Leaves the form untouched when the total does not fit.
    fn reprice(&mut self, price: Decimal, quantity: u32) -> Result<(), ServiceError> {
        self.total_amount = pricing::total_amount(price, quantity)?;
        self.price = price;
        Ok(())
    }

    pub fn validate_step(&self, step: WizardStep) -> FieldErrors {
        let result = match step {
            WizardStep::ProductAndPrice => ProductStep {
                workshop_id: self.workshop_id,
                participants: self.participants.clone(),
            }
            .validate(),
            WizardStep::CustomerInformation => CustomerStep {
                name: &self.name,
                email: &self.email,
                phone: &self.phone,
                customer_bank_name: &self.customer_bank_name,
                customer_bank_account: &self.customer_bank_account,
                customer_bank_number: &self.customer_bank_number,
                booking_trx_id: self.booking_trx_id.trim(),
            }
            .validate(),
            WizardStep::PaymentInformation => PaymentStep { is_paid: self.is_paid, proof: self.proof.clone() }.validate(),
        };
        let mut errors = match result {
            Ok(()) => FieldErrors::default(),
            Err(e) => FieldErrors::from(&e),
        };
        if step == WizardStep::ProductAndPrice && self.quantity > MAX_QUANTITY {
            errors.add("quantity", quantity_message());
        }
        errors
    }

    /// Every step plus the roster size check, as required before saving.
    pub fn validate_all(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        for step in WizardStep::ALL {
            errors.merge(self.validate_step(step));
        }
        if self.participants.len() != self.quantity as usize {
            errors.add(
                "participants",
                format!("expected {} participants, got {}", self.quantity, self.participants.len()),
            );
        }
        errors
    }

    pub fn into_submission(self) -> Result<BookingSubmission, ServiceError> {
        self.validate_all().into_result()?;
        let (Some(workshop_id), Some(is_paid), Some(proof)) = (self.workshop_id, self.is_paid, self.proof) else {
            return Err(ServiceError::Validation("incomplete booking form".into()));
        };
        Ok(BookingSubmission {
            workshop_id,
            quantity: self.quantity,
            participants: self.participants,
            name: self.name,
            email: self.email,
            phone: self.phone,
            customer_bank_name: self.customer_bank_name,
            customer_bank_account: self.customer_bank_account,
            customer_bank_number: self.customer_bank_number,
            booking_trx_id: self.booking_trx_id,
            is_paid,
            proof,
        })
    }
}

/// Wizard pages; each can be validated on its own while navigating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    ProductAndPrice,
    CustomerInformation,
    PaymentInformation,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [WizardStep::ProductAndPrice, WizardStep::CustomerInformation, WizardStep::PaymentInformation];
}

impl FromStr for WizardStep {
    type Err = ServiceError;

    /// Accepts the kebab-case name or the 1-based position.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" | "product-and-price" => Ok(WizardStep::ProductAndPrice),
            "2" | "customer-information" => Ok(WizardStep::CustomerInformation),
            "3" | "payment-information" => Ok(WizardStep::PaymentInformation),
            other => Err(ServiceError::Validation(format!("unknown wizard step '{other}'"))),
        }
    }
}

#[derive(Validate)]
struct ProductStep {
    #[validate(required(message = "select a workshop"))]
    workshop_id: Option<Uuid>,
    #[validate(nested)]
    participants: Vec<ParticipantInput>,
}

#[derive(Validate)]
struct CustomerStep<'a> {
    #[validate(length(max = 255, message = "name is at most 255 characters"), custom(function = "errors::not_blank"))]
    name: &'a str,
    #[validate(length(max = 255, message = "email is at most 255 characters"), custom(function = "errors::not_blank"))]
    email: &'a str,
    #[validate(length(max = 255, message = "phone is at most 255 characters"), custom(function = "errors::not_blank"))]
    phone: &'a str,
    #[validate(length(max = 255, message = "bank name is at most 255 characters"), custom(function = "errors::not_blank"))]
    customer_bank_name: &'a str,
    #[validate(length(max = 255, message = "bank account is at most 255 characters"), custom(function = "errors::not_blank"))]
    customer_bank_account: &'a str,
    #[validate(length(max = 255, message = "bank number is at most 255 characters"), custom(function = "errors::not_blank"))]
    customer_bank_number: &'a str,
    #[validate(length(max = 255, message = "booking transaction id is at most 255 characters"), custom(function = "errors::not_blank"))]
    booking_trx_id: &'a str,
}

#[derive(Validate)]
struct PaymentStep {
    #[validate(required(message = "choose whether the booking is paid"))]
    is_paid: Option<bool>,
    #[validate(required(message = "payment proof is required"), length(min = 1, max = 255, message = "payment proof is required"))]
    proof: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn participant(n: &str) -> ParticipantInput {
        ParticipantInput { name: n.into(), occupation: "Designer".into(), email: format!("{n}@example.com") }
    }

    fn complete_form() -> BookingForm {
        let mut f = BookingForm::blank("WSP1234".into());
        f.select_workshop(Some(Uuid::new_v4()), Some(dec!(150000))).unwrap();
        f.change_quantity(2).unwrap();
        f.participants = vec![participant("ana"), participant("budi")];
        f.name = "Ana".into();
        f.email = "ana@example.com".into();
        f.phone = "0812".into();
        f.customer_bank_name = "BCA".into();
        f.customer_bank_account = "Ana".into();
        f.customer_bank_number = "12345".into();
        f.is_paid = Some(false);
        f.proof = Some("proofs/a.png".into());
        f
    }

    #[test]
    fn growing_quantity_appends_blank_rows_and_keeps_existing() {
        for (q1, q2) in [(0usize, 3usize), (2, 5), (4, 1), (3, 3), (5, 0)] {
            let mut rows: Vec<_> = (0..q1).map(|i| participant(&format!("p{i}"))).collect();
            let before = rows.clone();
            sync_participants(&mut rows, q2);
            assert_eq!(rows.len(), q2);
            let kept = q1.min(q2);
            assert_eq!(&rows[..kept], &before[..kept]);
            assert!(rows[kept..].iter().all(|p| *p == ParticipantInput::default()));
        }
    }

    #[test]
    fn selecting_workshop_and_quantity_prices_with_tax() {
        let mut f = BookingForm::blank("WSP0001".into());
        f.apply(FormEvent::WorkshopSelected { workshop_id: Some(Uuid::new_v4()) }, Some(dec!(150000))).unwrap();
        assert_eq!(f.total_amount, Decimal::ZERO);
        f.apply(FormEvent::QuantityChanged { quantity: 2 }, Some(dec!(150000))).unwrap();
        assert_eq!(f.price, dec!(150000));
        assert_eq!(f.total_amount, dec!(333000.00));
        assert_eq!(f.participants.len(), 2);
    }

    #[test]
    fn unknown_or_cleared_workshop_prices_at_zero() {
        let mut f = BookingForm::blank("WSP0002".into());
        f.change_quantity(3).unwrap();
        f.apply(FormEvent::WorkshopSelected { workshop_id: Some(Uuid::new_v4()) }, None).unwrap();
        assert_eq!((f.price, f.total_amount), (Decimal::ZERO, Decimal::ZERO));
        f.apply(FormEvent::WorkshopSelected { workshop_id: None }, Some(dec!(10))).unwrap();
        assert_eq!(f.workshop_id, None);
    }

    #[test]
    fn hydration_reprices_but_keeps_roster() {
        let mut f = complete_form();
        f.participants.pop();
        f.total_amount = dec!(1);
        f.apply(FormEvent::Hydrated, Some(dec!(100))).unwrap();
        assert_eq!(f.price, dec!(100));
        assert_eq!(f.total_amount, dec!(222.00));
        assert_eq!(f.participants.len(), 1);
    }

    #[test]
    fn quantity_change_uses_the_resolved_price_not_the_posted_one() {
        let mut f = BookingForm::blank("WSP0003".into());
        f.workshop_id = Some(Uuid::new_v4());
        f.price = Decimal::MAX;
        f.apply(FormEvent::QuantityChanged { quantity: 2 }, Some(dec!(10))).unwrap();
        assert_eq!((f.price, f.total_amount), (dec!(10), dec!(22.20)));
        f.price = Decimal::MAX;
        f.apply(FormEvent::QuantityChanged { quantity: 1 }, None).unwrap();
        assert_eq!((f.price, f.total_amount), (Decimal::ZERO, Decimal::ZERO));
    }

    #[test]
    fn quantity_above_the_cap_is_rejected_before_resizing() {
        let mut f = BookingForm::blank("WSP0004".into());
        for q in [MAX_QUANTITY + 1, u32::MAX] {
            match f.apply(FormEvent::QuantityChanged { quantity: q }, Some(dec!(10))) {
                Err(ServiceError::Invalid(fields)) => assert!(fields.contains("quantity")),
                other => panic!("expected quantity error, got {other:?}"),
            }
            assert_eq!((f.quantity, f.participants.len()), (0, 0));
        }
        f.apply(FormEvent::QuantityChanged { quantity: MAX_QUANTITY }, Some(dec!(10))).unwrap();
        assert_eq!(f.participants.len(), MAX_QUANTITY as usize);

        f.quantity = MAX_QUANTITY + 1;
        assert!(f.validate_step(WizardStep::ProductAndPrice).contains("quantity"));
    }

    #[test]
    fn overflowing_total_leaves_form_unchanged() {
        let mut f = BookingForm::blank("WSP0005".into());
        f.change_quantity(2).unwrap();
        assert!(f.apply(FormEvent::WorkshopSelected { workshop_id: Some(Uuid::new_v4()) }, Some(Decimal::MAX)).is_err());
        assert_eq!((f.workshop_id, f.price, f.total_amount), (None, Decimal::ZERO, Decimal::ZERO));
    }

    #[test]
    fn whitespace_only_values_fail_their_step() {
        let mut f = complete_form();
        f.participants[0].name = "   ".into();
        assert!(f.validate_step(WizardStep::ProductAndPrice).contains("participants[0].name"));
        f.phone = " \t ".into();
        let customer = f.validate_step(WizardStep::CustomerInformation);
        assert!(customer.contains("phone") && !customer.contains("name"), "{customer}");
        assert!(matches!(f.into_submission(), Err(ServiceError::Invalid(_))));
    }

    #[test]
    fn steps_validate_independently() {
        let f = BookingForm::blank("".into());
        let product = f.validate_step(WizardStep::ProductAndPrice);
        assert!(product.contains("workshop_id"));
        let customer = f.validate_step(WizardStep::CustomerInformation);
        assert!(customer.contains("name") && customer.contains("booking_trx_id"));
        assert!(!customer.contains("workshop_id"));
        let payment = f.validate_step(WizardStep::PaymentInformation);
        assert!(payment.contains("is_paid") && payment.contains("proof"));
    }

    #[test]
    fn blank_participant_fields_are_reported_by_path() {
        let mut f = complete_form();
        f.participants[1].email.clear();
        let errors = f.validate_step(WizardStep::ProductAndPrice);
        assert!(errors.contains("participants[1].email"), "{errors}");
    }

    #[test]
    fn saving_requires_roster_to_match_quantity() {
        let mut f = complete_form();
        assert!(f.validate_all().is_empty());
        f.quantity = 3;
        assert!(f.validate_all().contains("participants"));
        assert!(matches!(f.into_submission(), Err(ServiceError::Invalid(_))));
    }

    #[test]
    fn submission_carries_validated_values() {
        let s = complete_form().into_submission().unwrap();
        assert_eq!(s.quantity, 2);
        assert!(!s.is_paid);
        let (fields, participants) = s.into_fields(dec!(150000)).unwrap();
        assert_eq!(fields.total_amount, dec!(333000.00));
        assert_eq!(participants.len(), 2);
    }

    #[test]
    fn parses_steps_by_name_or_position() {
        assert_eq!("2".parse::<WizardStep>().unwrap(), WizardStep::CustomerInformation);
        assert_eq!("payment-information".parse::<WizardStep>().unwrap(), WizardStep::PaymentInformation);
        assert!("4".parse::<WizardStep>().is_err());
    }

    #[test]
    fn events_deserialize_from_tagged_json() {
        let e: FormEvent = serde_json::from_str(r#"{"type":"quantity_changed","quantity":4}"#).unwrap();
        assert_eq!(e, FormEvent::QuantityChanged { quantity: 4 });
        let h: FormEvent = serde_json::from_str(r#"{"type":"hydrated"}"#).unwrap();
        assert_eq!(h, FormEvent::Hydrated);
    }
}
