//! Reference data: categories and instructors used by workshop selects and filters.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::ReferenceService;
