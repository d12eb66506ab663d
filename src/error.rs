//! Error types for the command line surface.
//!
//! Each layer keeps its own error enum; this module gathers them into one
//! [`Web2AppError`] so commands can use `?` across layers.

use thiserror::Error;

/// Result type alias for application operations
pub type Result<T> = std::result::Result<T, Web2AppError>;

/// Main error type for all application operations
#[derive(Error, Debug)]
pub enum Web2AppError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Bundle generation errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Rejected target URL
    #[error("{0}")]
    Url(#[from] crate::model::UrlError),

    /// Descriptor store errors
    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),

    /// Launcher runtime configuration errors
    #[error("{0}")]
    Config(#[from] crate::launcher::ConfigError),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// No stored web app matches the given key
    #[error("No web app matches \"{key}\"")]
    UnknownApp {
        /// Id, id prefix or name that was looked up
        key: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl Web2AppError {
    /// Suggestions printed under the error message.
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error as BundleError;

        match self {
            Self::Url(_) => vec!["Enter a full address such as https://example.com".to_string()],
            Self::Bundler(BundleError::ToolLaunch { tool, .. }) => vec![format!(
                "{tool} could not be started; generation requires the macOS command line tools"
            )],
            Self::Bundler(BundleError::ToolTimeout { .. }) => {
                vec!["Raise tool_timeout_secs in settings.toml if the machine is slow".to_string()]
            }
            Self::Store(crate::store::StoreError::UnsupportedVersion(_)) => {
                vec!["The data file was written by a newer release".to_string()]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
