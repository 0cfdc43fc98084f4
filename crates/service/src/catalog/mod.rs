//! Workshop catalog: listing, detail, edits and the soft-delete lifecycle.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::WorkshopService;
