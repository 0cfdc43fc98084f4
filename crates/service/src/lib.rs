//! Service layer for the workshop back office.
//! - Domain types and repository traits per resource, with SeaORM and
//!   in-memory implementations.
//! - Business rules (pricing, roster sync, wizard validation, soft delete)
//!   live here, independent of the HTTP layer.

pub mod errors;
pub mod pagination;
pub mod search;
pub mod trashed;
pub mod pricing;
pub mod storage;
pub mod runtime;
pub mod reference;
pub mod catalog;
pub mod booking;
pub mod front;
#[cfg(any(test, feature = "test-support"))]
pub mod mock;
#[cfg(test)]
pub mod test_support;
