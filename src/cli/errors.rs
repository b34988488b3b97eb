//! CLI-specific error types
//!
//! All CLI errors are fatal: `main` prints them with their code and
//! exits non-zero.

use std::io;

use thiserror::Error;

use crate::http_server::ConfigError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file error
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Server failed to bind or serve
    #[error("{0}")]
    Server(#[from] io::Error),
}

impl CliError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "GRADEBOOK_CLI_CONFIG_ERROR",
            Self::Server(_) => "GRADEBOOK_CLI_SERVER_ERROR",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
