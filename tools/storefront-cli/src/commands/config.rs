//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    let config = redacted(&ctx.config);
    if ctx.output.is_json() {
        ctx.output.json(&config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &config.api.base_url);
    ctx.output.kv("timeout_secs", &config.api.timeout_secs.to_string());
    if let Some(ref token) = config.api.token {
        ctx.output.kv("token", token);
    }

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output
        .kv("homepage_page_size", &config.catalog.homepage_page_size.to_string());
    ctx.output.kv("admin_page_size", &config.catalog.admin_page_size.to_string());
    ctx.output.kv("debounce_ms", &config.catalog.debounce_ms.to_string());
    ctx.output.kv("stale_policy", config.catalog.stale_policy.as_str());

    ctx.output.info("");
    ctx.output.info("[log]");
    ctx.output.kv("filter", &config.log.filter);

    Ok(())
}

/// Copy of the config with the token masked.
fn redacted(config: &CliConfig) -> CliConfig {
    let mut config = config.clone();
    if let Some(token) = config.api.token.as_mut() {
        let visible: String = token.chars().take(4).collect();
        *token = format!("{}…", visible);
    }
    config
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("storefront.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

/// Writes to the file on disk, reloaded so environment overrides are not persisted.
async fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let path = ctx
        .config_path
        .clone()
        .unwrap_or_else(|| ctx.cwd.join("storefront.toml"));
    let path_str = path
        .to_str()
        .with_context(|| format!("Config path is not valid UTF-8: {}", path.display()))?;

    let mut config = if path.exists() {
        CliConfig::load(path_str)?
    } else {
        CliConfig::default()
    };
    config.set(key, value)?;
    config.validate()?;
    config.save(path_str)?;

    ctx.output.success(&format!("Set {} = {} in {}", key, value, path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_masks_token() {
        let mut config = CliConfig::default();
        config.api.token = Some("eyJhbGciOiJIUzI1NiJ9.secret".into());
        let shown = redacted(&config);
        assert_eq!(shown.api.token.as_deref(), Some("eyJh…"));
        assert_eq!(shown.api.base_url, config.api.base_url);
    }

    #[test]
    fn test_redacted_without_token() {
        let config = CliConfig::default();
        assert_eq!(redacted(&config), config);
    }
}
