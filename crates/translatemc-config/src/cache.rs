//! Thread-safe configuration caching with arc-swap for lock-free reads.

use crate::loader::{ConfigError, ConfigLoader};
use crate::schema::Config;
use arc_swap::ArcSwap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Thread-safe configuration cache using arc-swap for lock-free reads.
pub struct ConfigCache {
    config: ArcSwap<Config>,
    source: Option<PathBuf>,
}

impl ConfigCache {
    /// Creates a new configuration cache with the given initial configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
            source: None,
        }
    }

    /// Creates a cache that reloads from the given file.
    pub fn with_source(config: Config, source: impl Into<PathBuf>) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
            source: Some(source.into()),
        }
    }

    /// Gets the current configuration.
    pub fn get(&self) -> Arc<Config> {
        self.config.load_full()
    }

    /// Updates the configuration atomically.
    pub fn update(&self, config: Config) {
        self.config.store(Arc::new(config));
    }

    /// Reloads the configuration from its source.
    ///
    /// On failure the current configuration stays in place.
    pub fn reload(&self) -> Result<Arc<Config>, ConfigError> {
        let loaded = match &self.source {
            Some(path) => ConfigLoader::load_from_file(path),
            None => ConfigLoader::load(),
        };

        match loaded {
            Ok(config) => {
                self.update(config);
                info!("Configuration reloaded");
                Ok(self.get())
            }
            Err(e) => {
                warn!("Configuration reload failed, keeping current configuration: {}", e);
                Err(e)
            }
        }
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
