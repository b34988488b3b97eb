//! CLI module for the results service
//!
//! Provides command-line interface for:
//! - start: Load configuration and serve the HTTP API

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{resolve_config, run_command, start, StartOverrides};
pub use errors::{CliError, CliResult};

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` overrides the default `gradebook=info,tower_http=info`.
/// Returns `false`, after reporting on stderr, when a subscriber was
/// already installed.
pub fn init_logging() -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gradebook=info,tower_http=info"));

    match tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        Ok(()) => true,
        Err(e) => {
            eprintln!("gradebook: logging not initialised: {}", e);
            false
        }
    }
}

/// Parse arguments, set up logging and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_logging();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_command(cli))
}
