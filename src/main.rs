mod cli;

use greekmovies::{
    config::{self, Config},
    server::{self, AppContext},
};
use greekmovies_common::{ExtraArgs, ResourceKind};
use greekmovies_scraper::AddonRequest;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // CLI flags win over config and environment
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting Greek Movies add-on");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );
    tracing::info!("Scraping {}", config.source.origin);

    server::start_server(config).await
}

/// Run one request through the coordinator and print the response body.
///
/// Catalog requests pass `None` and target the configured catalog.
async fn run_request(
    config_path: Option<&Path>,
    kind: ResourceKind,
    id: Option<String>,
    extra: ExtraArgs,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let id = id.unwrap_or_else(|| config.addon.catalog_id.clone());
    let ctx = AppContext::from_config(config)?;

    let request = AddonRequest::new(kind.as_str(), "movie", id).with_extra(extra);
    let response = ctx.coordinator.handle(&request).await;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "greekmovies=trace,greekmovies_scraper=trace,greekmovies_common=debug,tower_http=debug"
                .to_string()
        } else {
            "greekmovies=debug,greekmovies_scraper=info,tower_http=info".to_string()
        }
    });

    // Logs go to stderr so extraction commands print clean JSON on stdout
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, config_path))
        }
        Commands::Catalog { search } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_request(
                config_path,
                ResourceKind::Catalog,
                None,
                ExtraArgs { search },
            ))
        }
        Commands::Meta { id } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_request(
                config_path,
                ResourceKind::Meta,
                Some(id),
                ExtraArgs::default(),
            ))
        }
        Commands::Streams { id } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_request(
                config_path,
                ResourceKind::Stream,
                Some(id),
                ExtraArgs::default(),
            ))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or_else(|| cli.config.clone());
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("greekmovies {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Source: {}", config.source.origin);
    println!("  Listing: {}", config.source.listing_path);
    println!("  ID prefix: {}", config.addon.id_prefix);
    println!("  Catalog: {} ({})", config.addon.catalog_id, config.addon.catalog_name);
    println!("  Max results: {}", config.source.max_results);
    println!("  Allowed stream hosts: {}", config.streams.allowed_hosts.len());

    Ok(())
}
