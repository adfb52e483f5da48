//! Service wiring for the host process.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;
use translatemc_commands::{PlaceholderExpander, TranslateCommand};
use translatemc_config::ConfigCache;
use translatemc_i18n::{
    CatalogSource, FetcherSettings, HttpCatalogSource, RefreshTask, ServiceSettings,
    TranslationService,
};

use crate::error::HostResult;

/// Everything a running host needs: configuration, the translation service,
/// its background refresh, and the command layer on top.
pub struct TranslateHost {
    config: Arc<ConfigCache>,
    service: TranslationService,
    command: TranslateCommand,
    expander: PlaceholderExpander,
    refresh: RefreshTask,
    started_at: DateTime<Utc>,
}

impl TranslateHost {
    /// Starts against the HTTP endpoint named in the configuration.
    pub async fn start(config: Arc<ConfigCache>) -> HostResult<Self> {
        let source = HttpCatalogSource::new(FetcherSettings::from(&config.get().api))?;
        Ok(Self::with_source(config, Arc::new(source)).await)
    }

    /// Starts against an arbitrary catalog source.
    ///
    /// The initial load happens here; a failure leaves the service serving
    /// keys until a later refresh succeeds.
    pub async fn with_source(config: Arc<ConfigCache>, source: Arc<dyn CatalogSource>) -> Self {
        let settings = ServiceSettings::from(&*config.get());
        info!(
            default_language = %settings.default_language,
            cache_secs = settings.cache_duration.as_secs(),
            "Starting translation service"
        );

        let service = TranslationService::connect(settings, source).await;
        let refresh = service.spawn_refresh_task();

        Self {
            command: TranslateCommand::new(service.clone(), config.clone()),
            expander: PlaceholderExpander::new(service.clone()),
            config,
            service,
            refresh,
            started_at: Utc::now(),
        }
    }

    /// The live configuration.
    pub fn config(&self) -> &Arc<ConfigCache> {
        &self.config
    }

    /// The translation service.
    pub const fn service(&self) -> &TranslationService {
        &self.service
    }

    /// The `translate` command handler.
    pub const fn command(&self) -> &TranslateCommand {
        &self.command
    }

    /// The placeholder expander.
    pub const fn expander(&self) -> &PlaceholderExpander {
        &self.expander
    }

    /// When the host started.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Stops the background refresh.
    pub async fn shutdown(self) {
        self.refresh.shutdown().await;
        info!("Translation host stopped");
    }
}
