use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub front: FrontConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

/// Where uploaded images (thumbnails, maps, payment proofs) are written.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// Upper bound for a single uploaded file.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { upload_dir: default_upload_dir(), max_upload_bytes: default_max_upload_bytes() }
    }
}

/// Landing page settings.
#[derive(Debug, Clone, Deserialize)]
pub struct FrontConfig {
    #[serde(default = "default_new_workshops_limit")]
    pub new_workshops_limit: u64,
}

impl Default for FrontConfig {
    fn default() -> Self {
        Self { new_workshops_limit: default_new_workshops_limit() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    /// Prefix of generated booking transaction ids, e.g. `WSP4821`.
    #[serde(default = "default_trx_prefix")]
    pub trx_prefix: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self { trx_prefix: default_trx_prefix() }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogConfig {
    #[serde(default)]
    pub format: LogFormat,
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_upload_dir() -> String { "storage/uploads".into() }
fn default_max_upload_bytes() -> usize { 5 * 1024 * 1024 }
fn default_new_workshops_limit() -> u64 { 6 }
fn default_trx_prefix() -> String { "WSP".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config file if present, otherwise defaults filled from the environment.
    pub fn load_or_env() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.storage.normalize_from_env();
        self.front.validate()?;
        self.booking.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        }
        if self.port == 0 {
            self.port = std::env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .ok_or_else(|| anyhow!("server.port must be in 1..=65535"))?;
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        // TOML wins; DATABASE_URL only fills a missing url
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
        if self.min_connections == 0 && self.max_connections == 0 {
            self.min_connections = default_min_connections();
            self.max_connections = default_max_connections();
        }
        if self.connect_timeout_secs == 0 { self.connect_timeout_secs = default_connect_timeout(); }
        if self.acquire_timeout_secs == 0 { self.acquire_timeout_secs = default_acquire_timeout(); }
        if self.idle_timeout_secs == 0 { self.idle_timeout_secs = default_idle_timeout(); }
        if self.max_lifetime_secs == 0 { self.max_lifetime_secs = default_max_lifetime(); }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(dir) = std::env::var("UPLOAD_DIR") {
            if !dir.trim().is_empty() {
                self.upload_dir = dir;
            }
        }
        if self.upload_dir.trim().is_empty() {
            self.upload_dir = default_upload_dir();
        }
    }
}

impl FrontConfig {
    fn validate(&self) -> Result<()> {
        if self.new_workshops_limit == 0 {
            return Err(anyhow!("front.new_workshops_limit must be >= 1"));
        }
        Ok(())
    }
}

impl BookingConfig {
    fn validate(&self) -> Result<()> {
        let p = self.trx_prefix.trim();
        if p.is_empty() || p.len() > 16 || !p.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(anyhow!("booking.trx_prefix must be 1..=16 ASCII alphanumerics"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sections_with_defaults() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [database]
            url = "postgres://u:p@localhost/workshops"

            [front]
            new_workshops_limit = 3

            [log]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.front.new_workshops_limit, 3);
        assert_eq!(cfg.booking.trx_prefix, "WSP");
        assert_eq!(cfg.storage.upload_dir, "storage/uploads");
        assert_eq!(cfg.log.format, LogFormat::Json);
    }

    #[test]
    fn rejects_non_postgres_url() {
        let db = DatabaseConfig { url: "mysql://x".into(), min_connections: 1, max_connections: 2, ..Default::default() };
        assert!(db.validate().is_err());
    }

    #[test]
    fn rejects_bad_trx_prefix() {
        assert!(BookingConfig { trx_prefix: "WS-P".into() }.validate().is_err());
        assert!(BookingConfig { trx_prefix: "".into() }.validate().is_err());
        assert!(BookingConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_limit_is_invalid() {
        assert!(FrontConfig { new_workshops_limit: 0 }.validate().is_err());
    }
}
