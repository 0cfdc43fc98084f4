use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use common::types::SelectOption;
use models::{category, workshop, workshop_benefit, workshop_instructor};

use crate::pricing;
use crate::trashed::Trashed;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BenefitInput {
    #[validate(length(min = 1, max = 255, message = "benefit name is required and at most 255 characters"))]
    pub name: String,
}

/// Create/update payload. Benefits replace the stored set, in order.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WorkshopInput {
    #[validate(length(min = 1, max = 255, message = "name is required and at most 255 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "thumbnail is required"))]
    pub thumbnail: String,
    #[validate(length(min = 1, max = 255, message = "venue thumbnail is required"))]
    pub venue_thumbnail: String,
    #[validate(length(min = 1, max = 255, message = "map background is required"))]
    pub bg_map: String,
    #[validate(length(min = 1, max = 255, message = "address is required and at most 255 characters"))]
    pub address: String,
    #[validate(length(min = 1, message = "about is required"))]
    pub about: String,
    #[validate(custom(function = "pricing::valid_price"))]
    pub price: Decimal,
    #[serde(default)]
    pub is_open: bool,
    #[serde(default)]
    pub has_started: bool,
    pub started_at: NaiveDate,
    pub time_at: NaiveTime,
    pub category_id: Uuid,
    pub workshop_instructor_id: Uuid,
    #[serde(default)]
    #[validate(nested)]
    pub benefits: Vec<BenefitInput>,
}

impl WorkshopInput {
    pub fn split(self) -> (workshop::WorkshopFields, Vec<String>) {
        let benefits = self.benefits.into_iter().map(|b| b.name.trim().to_string()).collect();
        let fields = workshop::WorkshopFields {
            name: self.name,
            thumbnail: self.thumbnail,
            venue_thumbnail: self.venue_thumbnail,
            bg_map: self.bg_map,
            address: self.address,
            about: self.about,
            price: self.price,
            is_open: self.is_open,
            has_started: self.has_started,
            started_at: self.started_at,
            time_at: self.time_at,
            category_id: self.category_id,
            workshop_instructor_id: self.workshop_instructor_id,
        };
        (fields, benefits)
    }
}

/// List filters as they arrive from the query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkshopFilter {
    /// substring of the workshop name, case-insensitive
    pub search: Option<String>,
    pub category_id: Option<Uuid>,
    /// category display name
    pub category: Option<String>,
    pub instructor_id: Option<Uuid>,
    /// instructor display name
    pub instructor: Option<String>,
    /// only workshops that have this booking
    pub booking_trx_id: Option<String>,
    pub trashed: Trashed,
}

/// Filters after display names were resolved to ids.
#[derive(Debug, Clone, Default)]
pub struct WorkshopQuery {
    pub search: Option<String>,
    pub category_ids: Option<Vec<Uuid>>,
    pub instructor_ids: Option<Vec<Uuid>>,
    pub booking_trx_id: Option<String>,
    pub trashed: Trashed,
}

impl WorkshopQuery {
    pub fn matches(&self, w: &workshop::Model) -> bool {
        if !self.trashed.admits(w.deleted_at.as_ref()) {
            return false;
        }
        if let Some(s) = &self.search {
            if !w.name.to_lowercase().contains(&s.to_lowercase()) {
                return false;
            }
        }
        if let Some(ids) = &self.category_ids {
            if !ids.contains(&w.category_id) {
                return false;
            }
        }
        if let Some(ids) = &self.instructor_ids {
            if !ids.contains(&w.workshop_instructor_id) {
                return false;
            }
        }
        true
    }
}

/// One line of the admin workshop table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkshopRow {
    pub id: Uuid,
    pub thumbnail: String,
    pub name: String,
    pub slug: String,
    pub category_name: Option<String>,
    pub instructor_name: Option<String>,
    pub has_started: bool,
    pub is_open: bool,
    pub price: Decimal,
    pub participants_count: u64,
    pub deleted_at: Option<DateTime<FixedOffset>>,
}

impl WorkshopRow {
    pub fn new(
        w: workshop::Model,
        category_name: Option<String>,
        instructor_name: Option<String>,
        participants_count: u64,
    ) -> Self {
        Self {
            id: w.id,
            thumbnail: w.thumbnail,
            name: w.name,
            slug: w.slug,
            category_name,
            instructor_name,
            has_started: w.has_started,
            is_open: w.is_open,
            price: w.price,
            participants_count,
            deleted_at: w.deleted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkshopDetail {
    #[serde(flatten)]
    pub workshop: workshop::Model,
    pub benefits: Vec<workshop_benefit::Model>,
    pub category: Option<category::Model>,
    pub instructor: Option<workshop_instructor::Model>,
}

/// Choices for the category and instructor filters.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOptions {
    pub categories: Vec<SelectOption<Uuid>>,
    pub instructors: Vec<SelectOption<Uuid>>,
}

/// Ids selected in the admin table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BulkIds {
    pub ids: Vec<Uuid>,
}
