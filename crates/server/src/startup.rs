use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use migration::{Migrator, MigratorTrait};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::{Repositories, ServerState};
use service::runtime;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Public entry: prepare storage, migrate, build the app and serve it.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    common::utils::logging::init_logging(cfg.log.format);

    runtime::ensure_env(&cfg.storage.upload_dir)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    let db = models::db::connect_with_config(&(&cfg.database).into()).await?;
    Migrator::up(&db, None).await?;
    info!(event = "migrated", "database schema up to date");

    let state = ServerState::new(Repositories::seaorm(db), &cfg);
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, upload_dir = %cfg.storage.upload_dir, "starting workshop admin server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "0.0.0.0".into();
        cfg.server.port = 9100;
        assert_eq!(bind_addr(&cfg).unwrap().port(), 9100);

        cfg.server.host = "not a host".into();
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }
}
