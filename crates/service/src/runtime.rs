//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the server can prepare upload
//! directories through the service crate.

/// Ensure the upload root and every image slot directory exist.
pub async fn ensure_env(upload_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_env(upload_dir).await
}
