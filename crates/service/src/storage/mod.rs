//! Image storage for workshop media and payment proofs.

pub mod local;

use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

pub use local::LocalFileStore;

/// Upload destinations; each maps to one directory under the upload root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSlot {
    Thumbnails,
    VenueThumbnails,
    BgMaps,
    Proofs,
}

impl ImageSlot {
    pub fn dir(self) -> &'static str {
        match self {
            ImageSlot::Thumbnails => "thumbnails",
            ImageSlot::VenueThumbnails => "venue_thumbnails",
            ImageSlot::BgMaps => "bg_maps",
            ImageSlot::Proofs => "proofs",
        }
    }
}

impl FromStr for ImageSlot {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "thumbnails" => Ok(ImageSlot::Thumbnails),
            "venue_thumbnails" => Ok(ImageSlot::VenueThumbnails),
            "bg_maps" => Ok(ImageSlot::BgMaps),
            "proofs" => Ok(ImageSlot::Proofs),
            other => Err(ServiceError::Validation(format!("unknown upload slot '{other}'"))),
        }
    }
}

/// File extension for an accepted image content type.
pub fn image_extension(content_type: &str) -> Option<&'static str> {
    let essence = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    match essence.as_str() {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/svg+xml" => Some("svg"),
        _ => None,
    }
}

/// Storage collaborator for uploaded images.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store `bytes` and return the reference saved on the record.
    async fn put(&self, slot: ImageSlot, content_type: &str, bytes: &[u8]) -> Result<String, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_round_trips_through_dir_name() {
        for slot in [ImageSlot::Thumbnails, ImageSlot::VenueThumbnails, ImageSlot::BgMaps, ImageSlot::Proofs] {
            assert_eq!(slot.dir().parse::<ImageSlot>().unwrap(), slot);
        }
        assert!("avatars".parse::<ImageSlot>().is_err());
    }

    #[test]
    fn only_images_have_extensions() {
        assert_eq!(image_extension("image/png"), Some("png"));
        assert_eq!(image_extension("IMAGE/JPEG; charset=binary"), Some("jpg"));
        assert_eq!(image_extension("application/pdf"), None);
    }
}
