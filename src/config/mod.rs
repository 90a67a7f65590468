mod types;

pub use types::*;

use anyhow::{Context, Result};
use greekmovies_scraper::search::QUERY_PLACEHOLDER;
use greekmovies_scraper::SearchMode;
use std::path::Path;

/// Environment variables that override `server.port`, in priority order.
pub const PORT_ENV_VARS: [&str; 2] = ["GREEKMOVIES_PORT", "PORT"];

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config)?;
    validate_config(&config).with_context(|| format!("Invalid config file: {:?}", path))?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./config.toml",
        "./greekmovies.toml",
        "~/.config/greekmovies/config.toml",
        "/etc/greekmovies/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    let mut config = Config::default();
    apply_env_overrides(&mut config)?;
    validate_config(&config)?;
    Ok(config)
}

/// Apply `GREEKMOVIES_PORT` / `PORT` to the server section.
fn apply_env_overrides(config: &mut Config) -> Result<()> {
    for var in PORT_ENV_VARS {
        if let Ok(value) = std::env::var(var) {
            config.server.port = value
                .trim()
                .parse()
                .with_context(|| format!("{var} is not a valid port: {value:?}"))?;
            break;
        }
    }
    Ok(())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.addon.id_prefix.is_empty() {
        anyhow::bail!("Addon id_prefix cannot be empty");
    }

    if config.addon.catalog_id.trim().is_empty() {
        anyhow::bail!("Addon catalog_id cannot be empty");
    }

    let origin = url::Url::parse(&config.source.origin)
        .with_context(|| format!("Source origin is not a URL: {}", config.source.origin))?;
    if !matches!(origin.scheme(), "http" | "https") || origin.host_str().is_none() {
        anyhow::bail!(
            "Source origin must be an absolute http(s) URL: {}",
            config.source.origin
        );
    }

    if config.source.max_results == 0 {
        anyhow::bail!("Source max_results must be at least 1");
    }

    if config.source.timeout_secs == 0 {
        anyhow::bail!("Source timeout_secs must be at least 1");
    }

    if let SearchMode::Server { path } = &config.source.search {
        if !path.contains(QUERY_PLACEHOLDER) {
            anyhow::bail!(
                "Server search path must contain {}: {}",
                QUERY_PLACEHOLDER,
                path
            );
        }
    }

    config
        .selectors
        .compile()
        .context("Invalid selector configuration")?;

    if config.streams.allowed_hosts.is_empty() {
        tracing::warn!("streams.allowed_hosts is empty; any embedded player will be accepted");
    }

    Ok(())
}
