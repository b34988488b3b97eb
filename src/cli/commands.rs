//! CLI command implementations

use std::path::Path;

use tracing::info;

use crate::http_server::{HttpServer, HttpServerConfig};

use super::args::{Cli, Command};
use super::errors::CliResult;

/// Overrides given on the command line (or via `PORT`)
#[derive(Debug, Default, Clone)]
pub struct StartOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Resolve the server configuration.
///
/// Precedence: overrides, then the config file, then defaults.
pub fn resolve_config(
    config_path: Option<&Path>,
    overrides: StartOverrides,
) -> CliResult<HttpServerConfig> {
    let mut config = match config_path {
        Some(path) => HttpServerConfig::load(path)?,
        None => HttpServerConfig::default(),
    };

    if let Some(host) = overrides.host {
        config.host = host;
    }
    if let Some(port) = overrides.port {
        config.port = port;
    }

    Ok(config)
}

/// Run a parsed command to completion
pub async fn run_command(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Start { config, host, port } => {
            let config = resolve_config(config.as_deref(), StartOverrides { host, port })?;
            start(config).await
        }
    }
}

/// Serve the results API until shutdown
pub async fn start(config: HttpServerConfig) -> CliResult<()> {
    info!(
        seed_sample_data = config.seed_sample_data,
        cors_origins = config.cors_origins.len(),
        "starting results API"
    );

    HttpServer::with_config(config).start().await?;
    Ok(())
}
