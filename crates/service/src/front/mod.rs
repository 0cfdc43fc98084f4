//! Data for the public landing page.

pub mod service;

pub use service::{FrontPageData, FrontService};
