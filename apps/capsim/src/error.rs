//! CLI error handling

use std::fmt;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Configuration error
    Config(capsim_errors::ConfigError),
    /// Simulation error
    Sim(capsim_errors::Error),
    /// I/O error
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {e}"),
            CliError::Sim(e) => write!(f, "{e}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Sim(e) => Some(e),
            CliError::Io(e) => Some(e),
        }
    }
}

impl From<capsim_errors::ConfigError> for CliError {
    fn from(e: capsim_errors::ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<capsim_errors::Error> for CliError {
    fn from(e: capsim_errors::Error) -> Self {
        CliError::Sim(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
