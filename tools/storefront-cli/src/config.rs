//! CLI configuration.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::search::{ADMIN_PAGE_SIZE, HOMEPAGE_PAGE_SIZE};
use storefront_state::{StalePolicy, StoreConfig, DEFAULT_DEBOUNCE};

/// Overrides `api.base_url`.
pub const API_URL_ENV: &str = "STOREFRONT_API_URL";
/// Overrides `api.token`.
pub const TOKEN_ENV: &str = "STOREFRONT_TOKEN";

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content).with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content).with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Apply `STOREFRONT_API_URL` and `STOREFRONT_TOKEN`.
    pub fn with_env(mut self) -> Self {
        self.apply_overrides(std::env::var(API_URL_ENV).ok(), std::env::var(TOKEN_ENV).ok());
        self
    }

    fn apply_overrides(&mut self, base_url: Option<String>, token: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.api.token = Some(token);
        }
    }

    /// Reject values the client cannot work with.
    pub fn validate(&self) -> Result<()> {
        let url = &self.api.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            bail!("api.base_url must start with http:// or https:// (got '{}')", url);
        }
        if self.api.timeout_secs == 0 {
            bail!("api.timeout_secs must be at least 1");
        }
        if self.catalog.homepage_page_size == 0 || self.catalog.admin_page_size == 0 {
            bail!("catalog page sizes must be at least 1");
        }
        Ok(())
    }

    /// Set one `section.field` value from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fn number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
            value
                .parse()
                .map_err(|_| anyhow::anyhow!("{} expects a number, got '{}'", key, value))
        }

        match key {
            "api.base_url" => self.api.base_url = value.to_string(),
            "api.timeout_secs" => self.api.timeout_secs = number(key, value)?,
            "catalog.homepage_page_size" => self.catalog.homepage_page_size = number(key, value)?,
            "catalog.admin_page_size" => self.catalog.admin_page_size = number(key, value)?,
            "catalog.debounce_ms" => self.catalog.debounce_ms = number(key, value)?,
            "catalog.stale_policy" => {
                self.catalog.stale_policy = StalePolicy::parse(value).with_context(|| {
                    format!(
                        "catalog.stale_policy must be '{}' or '{}'",
                        StalePolicy::LastResolvedWins.as_str(),
                        StalePolicy::LatestRequestWins.as_str()
                    )
                })?
            }
            "log.filter" => self.log.filter = value.to_string(),
            "api.token" => bail!("api.token is managed by `storefront login` and `storefront logout`"),
            _ => bail!("Unknown config key: {}", key),
        }
        Ok(())
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            stale_policy: self.catalog.stale_policy,
            homepage_page_size: self.catalog.homepage_page_size,
        }
    }
}

/// Remote API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Session token; normally written by `storefront login`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            token: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Catalog and state container settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_homepage_page_size")]
    pub homepage_page_size: u32,

    #[serde(default = "default_admin_page_size")]
    pub admin_page_size: u32,

    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default)]
    pub stale_policy: StalePolicy,
}

fn default_homepage_page_size() -> u32 {
    HOMEPAGE_PAGE_SIZE
}

fn default_admin_page_size() -> u32 {
    ADMIN_PAGE_SIZE
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE.as_millis() as u64
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            homepage_page_size: default_homepage_page_size(),
            admin_page_size: default_admin_page_size(),
            debounce_ms: default_debounce_ms(),
            stale_policy: StalePolicy::default(),
        }
    }
}

/// Log settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default `tracing` filter; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

/// Generate a default storefront.toml.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront client configuration

[api]
base_url = "{base_url}"
timeout_secs = {timeout}
# token is written by `storefront login`; STOREFRONT_TOKEN overrides it

[catalog]
homepage_page_size = {home}
admin_page_size = {admin}
debounce_ms = {debounce}
# "last-resolved-wins" or "latest-request-wins"
stale_policy = "{policy}"

[log]
filter = "{filter}"
"#,
        base_url = default_base_url(),
        timeout = default_timeout_secs(),
        home = HOMEPAGE_PAGE_SIZE,
        admin = ADMIN_PAGE_SIZE,
        debounce = default_debounce_ms(),
        policy = StalePolicy::default().as_str(),
        filter = default_log_filter(),
    )
}
