//! urlshort: a small redirect server.
//!
//! ```text
//!   Client ──▶ axum::serve ──▶ RedirectService ──┬──▶ 308 Location: <url>
//!                                                └──▶ fallback ("Hello, world!")
//! ```
//!
//! Settings come from an optional TOML file, redirects from inline records
//! and/or a YAML or JSON document. Both are read once at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use urlshort::config::{
    load_redirects, read_config, resolve_config, ConfigError, ConfigOverrides, ServerConfig,
};
use urlshort::http::HttpServer;
use urlshort::lifecycle::shutdown_signal;
use urlshort::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "urlshort")]
#[command(about = "Redirect request paths to configured URLs", long_about = None)]
struct Cli {
    /// Server settings (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Redirect document (YAML, or JSON by .json extension)
    #[arg(short, long)]
    redirects: Option<PathBuf>,

    /// Listen address, overrides the settings file
    #[arg(short, long)]
    bind: Option<String>,

    /// Log level, overrides the settings file
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => read_config(path),
        None => Ok(ServerConfig::default()),
    };

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| settings.as_ref().ok().map(|c| c.observability.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    logging::init(&log_level)?;
    tracing::info!("urlshort v{} starting", env!("CARGO_PKG_VERSION"));

    let overrides = ConfigOverrides {
        redirects: cli.redirects,
        bind_address: cli.bind,
        log_level: cli.log_level,
    };
    let config = match settings.and_then(|config| resolve_config(config, &overrides)) {
        Ok(config) => config,
        Err(e) => {
            log_config_error(&e);
            return Err(e.into());
        }
    };

    let mapping = match load_redirects(&config.redirects) {
        Ok(mapping) => mapping,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load redirects");
            return Err(e.into());
        }
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        redirects = mapping.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = match config.observability.metrics_address.parse() {
            Ok(addr) => addr,
            Err(e) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    error = %e,
                    "Failed to parse metrics address"
                );
                return Err(e.into());
            }
        };
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(&config, mapping);
    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn log_config_error(error: &ConfigError) {
    match error {
        ConfigError::Validation(errors) => {
            for e in errors {
                tracing::error!(error = %e, "Invalid configuration");
            }
        }
        e => tracing::error!(error = %e, "Failed to load configuration"),
    }
}
