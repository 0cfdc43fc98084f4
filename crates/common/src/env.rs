//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Upload sub-directories, one per image slot.
pub const UPLOAD_SLOTS: [&str; 4] = ["thumbnails", "venue_thumbnails", "bg_maps", "proofs"];

/// Ensure the upload root and its slot directories exist.
pub async fn ensure_env(upload_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(upload_dir).await.is_err() {
        warn!(%upload_dir, "upload directory missing; creating it");
    }
    for slot in UPLOAD_SLOTS {
        let dir = Path::new(upload_dir).join(slot);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    }
    info!(%upload_dir, "upload directories ready");
    Ok(())
}
