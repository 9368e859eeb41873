use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_CACHE_TTL_SECS, DEFAULT_CONFIG_PATH, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_LOG_DIR, DEFAULT_PORT, DEFAULT_TABLE_NAME,
};
use crate::error::{CatalogError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub cache: CacheConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub api_key: String,
    pub base_id: String,
    pub table_name: String,
    pub api_url: String,
    pub timeout_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_id: String::new(),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

// Keeps the API key out of logs
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .field("base_id", &self.base_id)
            .field("table_name", &self.table_name)
            .field("api_url", &self.api_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub metrics_port: Option<u16>,
    /// Bearer token for the admin routes; they are disabled when unset
    pub admin_token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            metrics_port: None,
            admin_token: None,
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("port", &self.port)
            .field("metrics_port", &self.metrics_port)
            .field("admin_token", &self.admin_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_LOG_DIR.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from an optional TOML file, then the environment.
    ///
    /// An explicitly given path must exist. Without one, `catalog.toml` in the
    /// working directory is used when present. `.env` is loaded first so its
    /// values participate in the environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv::dotenv().ok();

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => {
                CatalogError::Config(format!("Config file '{}' not found", path.display()))
            }
            _ => CatalogError::Io(e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Override file values with environment variables looked up via `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = set("AIRTABLE_API_KEY") {
            self.store.api_key = v;
        }
        if let Some(v) = set("AIRTABLE_BASE_ID") {
            self.store.base_id = v;
        }
        if let Some(v) = set("AIRTABLE_TABLE_NAME") {
            self.store.table_name = v;
        }
        if let Some(v) = set("AIRTABLE_API_URL") {
            self.store.api_url = v;
        }
        if let Some(v) = set("CATALOG_CACHE_TTL_SECS") {
            self.cache.ttl_seconds = parse_number("CATALOG_CACHE_TTL_SECS", &v)?;
        }
        if let Some(v) = set("PORT") {
            self.server.port = parse_number("PORT", &v)?;
        }
        if let Some(v) = set("CATALOG_ADMIN_TOKEN") {
            self.server.admin_token = Some(v);
        }
        if let Some(v) = set("CATALOG_LOG_DIR") {
            self.logging.dir = v;
        }
        Ok(())
    }

    /// Fail when the remote store cannot be reached with this configuration
    pub fn validate_store(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.store.api_key.is_empty() {
            missing.push("AIRTABLE_API_KEY");
        }
        if self.store.base_id.is_empty() {
            missing.push("AIRTABLE_BASE_ID");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::Config(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )))
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CatalogError::Config(format!("{key} must be a number, got '{value}'")))
}
