//! Application-wide error types using thiserror.

use translatemc_common::TranslateError;
use translatemc_config::ConfigError;
use translatemc_i18n::FetchError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum HostError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Configuration loaded but is invalid, or another shared error.
    #[error(transparent)]
    Translate(#[from] TranslateError),

    /// The catalog source could not be built or queried.
    #[error("Catalog error: {0}")]
    Fetch(#[from] FetchError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the host application.
pub type HostResult<T> = Result<T, HostError>;
