//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::cart::Cart;
use storefront_data::{FetchClient, HttpGateway};
use storefront_state::Storefront;
use tracing::debug;

use crate::config::CliConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    pub config: CliConfig,
    pub output: Output,
    pub cwd: PathBuf,
    /// Where the config was found, if anywhere.
    pub config_path: Option<PathBuf>,
    pub storefront: Storefront,
}

/// Token saved by `storefront login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSession {
    pub token: String,
    pub email: String,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            Self::find_config(&cwd).map_or((CliConfig::default(), None), |(c, p)| (c, Some(p)))
        };
        let config = config.with_env();
        config.validate()?;

        let client = FetchClient::with_timeout(config.api.timeout())
            .context("Failed to create HTTP client")?
            .with_base_url(config.api.base_url.clone());
        let gateway = Arc::new(HttpGateway::new(client));
        let storefront = Storefront::with_config(gateway, config.store_config());

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
            storefront,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let config_names = ["storefront.toml", ".storefront.toml", "storefront.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        debug!(path = %config_path.display(), "loaded config");
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Per-user data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        let dir = dirs_path().join("storefront");
        std::fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        Ok(dir)
    }

    fn cart_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("cart.json"))
    }

    fn session_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("session.json"))
    }

    /// Load the persisted cart into the store.
    pub fn load_cart(&self) -> Result<()> {
        let path = self.cart_path()?;
        if !path.exists() {
            return Ok(());
        }
        let content = std::fs::read_to_string(&path)?;
        let cart: Cart =
            serde_json::from_str(&content).with_context(|| format!("Corrupt cart file: {}", path.display()))?;
        self.storefront.restore_cart(cart);
        Ok(())
    }

    /// Persist the store's cart.
    pub fn save_cart(&self) -> Result<()> {
        let path = self.cart_path()?;
        let content = serde_json::to_string_pretty(&self.storefront.cart())?;
        std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn save_session(&self, session: &SavedSession) -> Result<()> {
        let path = self.session_path()?;
        std::fs::write(&path, serde_json::to_string_pretty(session)?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn clear_session(&self) -> Result<()> {
        let path = self.session_path()?;
        if path.exists() {
            std::fs::remove_file(&path).with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }

    /// Token from the environment or config, else from the last login.
    pub fn session_token(&self) -> Result<Option<String>> {
        if let Some(token) = &self.config.api.token {
            return Ok(Some(token.clone()));
        }
        let path = self.session_path()?;
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        let session: SavedSession = serde_json::from_str(&content).context("Corrupt session file")?;
        Ok(Some(session.token))
    }

    /// Sign in with the stored token, if there is one.
    pub async fn resume_session(&self) -> Result<bool> {
        let Some(token) = self.session_token()? else {
            return Ok(false);
        };
        let spinner = self.output.spinner("Restoring session...");
        let result = self.storefront.resume(token).await;
        spinner.finish_and_clear();
        result.context("Stored session is no longer valid; run `storefront login`")?;
        Ok(true)
    }
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}
