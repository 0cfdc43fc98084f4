//! Booking price arithmetic. All amounts carry two decimal places.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use validator::ValidationError;

use crate::errors::{FieldErrors, ServiceError};

/// Value-added tax applied on top of the subtotal.
pub const TAX_RATE: Decimal = dec!(0.11);

/// Largest amount a `NUMERIC(15,2)` column holds.
pub const MAX_AMOUNT: Decimal = dec!(9999999999999.99);

fn money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn subtotal(unit_price: Decimal, quantity: u32) -> Option<Decimal> {
    unit_price.checked_mul(Decimal::from(quantity))
}

pub fn tax(subtotal: Decimal) -> Option<Decimal> {
    subtotal.checked_mul(TAX_RATE)
}

/// `unit_price × quantity × 1.11`, rounded to the cent. Totals that do not
/// fit the amount column are reported against `total_amount`.
pub fn total_amount(unit_price: Decimal, quantity: u32) -> Result<Decimal, ServiceError> {
    let total = subtotal(unit_price, quantity)
        .and_then(|sub| tax(sub).and_then(|t| sub.checked_add(t)))
        .map(money)
        .filter(|t| t.abs() <= MAX_AMOUNT);
    total.ok_or_else(|| {
        let mut errors = FieldErrors::default();
        errors.add("total_amount", "total amount is out of range");
        ServiceError::Invalid(errors)
    })
}

fn range_error(message: &'static str) -> ValidationError {
    let mut e = ValidationError::new("range");
    e.message = Some(message.into());
    e
}

/// Validator hook for price inputs: non-negative, at most two decimals and
/// within the amount column.
pub fn valid_price(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(range_error("must not be negative"));
    }
    if value.normalize().scale() > 2 {
        return Err(range_error("at most two decimal places"));
    }
    if *value > MAX_AMOUNT {
        return Err(range_error("price is too large"));
    }
    Ok(())
}
