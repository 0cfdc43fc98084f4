use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::info;
use uuid::Uuid;

use super::{image_extension, FileStore, ImageSlot};
use crate::errors::ServiceError;

/// Writes uploads below a root directory, one sub-directory per slot.
#[derive(Clone, Debug)]
pub struct LocalFileStore {
    root: PathBuf,
    max_bytes: usize,
}

impl LocalFileStore {
    pub fn new<P: Into<PathBuf>>(root: P, max_bytes: usize) -> Self {
        Self { root: root.into(), max_bytes }
    }

    pub fn root(&self) -> &PathBuf { &self.root }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn put(&self, slot: ImageSlot, content_type: &str, bytes: &[u8]) -> Result<String, ServiceError> {
        let ext = image_extension(content_type)
            .ok_or_else(|| ServiceError::Validation(format!("unsupported content type '{content_type}'; an image is required")))?;
        if bytes.is_empty() {
            return Err(ServiceError::Validation("empty upload".into()));
        }
        if bytes.len() > self.max_bytes {
            return Err(ServiceError::Validation(format!("upload exceeds {} bytes", self.max_bytes)));
        }

        let dir = self.root.join(slot.dir());
        fs::create_dir_all(&dir).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        let file_name = format!("{}.{ext}", Uuid::new_v4());
        fs::write(dir.join(&file_name), bytes).await.map_err(|e| ServiceError::Storage(e.to_string()))?;

        let reference = format!("{}/{file_name}", slot.dir());
        info!(%reference, size = bytes.len(), "image stored");
        Ok(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> LocalFileStore {
        LocalFileStore::new(format!("target/test-data/{}", Uuid::new_v4()), 1024)
    }

    #[tokio::test]
    async fn writes_under_slot_directory() {
        let s = store();
        let reference = s.put(ImageSlot::Proofs, "image/png", b"\x89PNG").await.unwrap();
        assert!(reference.starts_with("proofs/") && reference.ends_with(".png"));
        let written = tokio::fs::read(s.root().join(&reference)).await.unwrap();
        assert_eq!(written, b"\x89PNG");
        let _ = tokio::fs::remove_dir_all(s.root()).await;
    }

    #[tokio::test]
    async fn rejects_non_images_and_oversized() {
        let s = store();
        assert!(matches!(s.put(ImageSlot::Thumbnails, "text/plain", b"hi").await, Err(ServiceError::Validation(_))));
        assert!(matches!(s.put(ImageSlot::Thumbnails, "image/png", &[0u8; 2048]).await, Err(ServiceError::Validation(_))));
        assert!(matches!(s.put(ImageSlot::Thumbnails, "image/png", b"").await, Err(ServiceError::Validation(_))));
    }
}
