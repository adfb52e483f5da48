//! Remote catalog fetcher
//!
//! A [`CatalogSource`] produces a complete [`Catalog`] or a [`FetchError`];
//! it holds no state between calls. [`HttpCatalogSource`] is the production
//! implementation talking to the translation service over HTTP.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use translatemc_config::ApiConfig;

use crate::catalog::Catalog;
use crate::error::FetchError;

/// Header carrying the API token.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Anything that can produce a fresh catalog snapshot.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches a complete catalog. Never returns a partial catalog.
    async fn fetch(&self) -> Result<Catalog, FetchError>;
}

/// Settings for [`HttpCatalogSource`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherSettings {
    /// Base URL of the translation service; `/keys` is appended
    pub base_url: String,
    /// Optional API token
    pub api_token: Option<String>,
    /// Connect timeout (default: 5s)
    pub connect_timeout: Duration,
    /// Read timeout (default: 5s)
    pub read_timeout: Duration,
}

impl FetcherSettings {
    /// Create settings with default timeouts and no token
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(5),
        }
    }

    /// Set the API token; blank tokens are ignored
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.api_token = (!token.trim().is_empty()).then_some(token);
        self
    }

    /// Set the connect and read timeouts
    #[must_use]
    pub const fn with_timeouts(mut self, connect: Duration, read: Duration) -> Self {
        self.connect_timeout = connect;
        self.read_timeout = read;
        self
    }

    /// Whole-request deadline: connect plus read
    pub const fn request_timeout(&self) -> Duration {
        self.connect_timeout.saturating_add(self.read_timeout)
    }

    /// Full URL of the catalog endpoint
    pub fn endpoint(&self) -> String {
        format!("{}/keys", self.base_url.trim_end_matches('/'))
    }
}

impl From<&ApiConfig> for FetcherSettings {
    fn from(api: &ApiConfig) -> Self {
        let settings = Self::new(api.url.clone())
            .with_timeouts(api.connect_timeout(), api.read_timeout());
        match api.token() {
            Some(token) => settings.with_token(token),
            None => settings,
        }
    }
}

/// Fetches the catalog from `GET {base_url}/keys`
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: Client,
    settings: FetcherSettings,
}

impl HttpCatalogSource {
    /// Create a new source with the given settings
    ///
    /// reqwest has no separate read deadline, so the request deadline is the
    /// connect timeout plus the read timeout, saturating on overflow.
    pub fn new(settings: FetcherSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| FetchError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self { client, settings })
    }

    /// The settings this source was built with
    pub const fn settings(&self) -> &FetcherSettings {
        &self.settings
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    #[instrument(skip(self), fields(endpoint = %self.settings.endpoint()))]
    async fn fetch(&self) -> Result<Catalog, FetchError> {
        let mut request = self
            .client
            .get(self.settings.endpoint())
            .header(header::ACCEPT, "application/json");
        if let Some(token) = &self.settings.api_token {
            request = request.header(API_KEY_HEADER, token);
        }

        debug!("Requesting translation catalog");
        let response = request
            .send()
            .await
            .map_err(|e| FetchError::from_transport("Catalog request failed", e))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Translation API returned status code: {}", status);
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_transport("Failed to read catalog body", e))?;

        let catalog = Catalog::from_json(&body)?;
        info!(
            keys = catalog.key_count(),
            languages = catalog.languages().len(),
            "Fetched translation catalog"
        );
        Ok(catalog)
    }
}
