//! Booking transactions: the multi-step form, persistence and lifecycle.

pub mod domain;
pub mod form;
pub mod repository;
pub mod repo;
pub mod service;

pub use form::{BookingForm, FormEvent, WizardStep};
pub use service::BookingService;
