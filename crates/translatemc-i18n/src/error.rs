//! Error types for remote catalog fetching

use thiserror::Error;
use translatemc_common::TranslateError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Reasons a catalog fetch can fail.
///
/// None of these are fatal: the service keeps serving its previous snapshot
/// and tries again on the next refresh trigger.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The connect or read deadline elapsed
    #[error("Catalog request timed out: {message}")]
    Timeout {
        /// Human readable description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<BoxError>,
    },

    /// The service answered with something other than 200
    #[error("Catalog request returned HTTP status {status}")]
    HttpStatus {
        /// Status code the service answered with
        status: u16,
    },

    /// The body was not a valid catalog document
    #[error("Failed to parse catalog: {message}")]
    Parse {
        /// Human readable description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<BoxError>,
    },

    /// Connection, DNS, TLS, or body transfer failure
    #[error("Catalog request failed: {message}")]
    Network {
        /// Human readable description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<BoxError>,
    },
}

impl FetchError {
    /// Create a timeout error with source
    pub fn timeout(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Timeout {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a parse error with source
    pub fn parse(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Parse {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a network error without a source
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Classify a transport error from reqwest
    pub fn from_transport(context: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(context.to_string(), err)
        } else if err.is_connect() {
            Self::network_with_source(format!("{context}: connection failed"), err)
        } else {
            Self::network_with_source(context.to_string(), err)
        }
    }

    /// HTTP status code for [`FetchError::HttpStatus`]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }

    /// Whether the error is a timeout
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Short label for log fields
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::HttpStatus { .. } => "http_status",
            Self::Parse { .. } => "parse",
            Self::Network { .. } => "network",
        }
    }
}

impl From<FetchError> for TranslateError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::HttpStatus { status } => {
                TranslateError::network_with_status(err.to_string(), status)
            }
            FetchError::Parse { .. } => {
                TranslateError::serialization_with_source("Invalid catalog payload", err)
            }
            other => TranslateError::network_with_source("Catalog fetch failed", other),
        }
    }
}
