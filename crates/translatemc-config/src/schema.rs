//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use translatemc_common::TranslateError;

use crate::defaults::DEFAULT_GUI_SIZE;
use crate::validator::ConfigValidator;

/// Main configuration structure for TranslateMC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote translation API configuration.
    pub api: ApiConfig,
    /// Language configuration.
    pub language: LanguageConfig,
    /// Catalog cache configuration.
    pub cache: CacheConfig,
    /// Optional host features.
    pub features: FeaturesConfig,
    /// Language selector layout.
    pub gui: GuiConfig,
    /// User-facing message templates.
    pub messages: MessagesConfig,
}

/// Remote translation API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL; the catalog is fetched from `{url}/keys`.
    pub url: String,
    /// API key sent as `X-API-Key` when present.
    pub token: Option<String>,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Read timeout in seconds.
    pub read_timeout_secs: u64,
}

/// Language configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Language used when a user has no preference and as the lookup fallback.
    pub default: String,
}

/// Catalog cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Seconds after which the cached catalog is considered stale.
    pub duration_secs: u64,
}

/// Optional host features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Prompt users without a language preference when they first join.
    #[serde(alias = "gui-on-first-join")]
    pub gui_on_first_join: bool,
}

/// Language selector layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    /// Selector title, color codes included.
    pub title: String,
    /// Number of slots; must be a multiple of 9 no larger than 54.
    pub size: usize,
}

/// User-facing message templates.
///
/// Templates are passed through to the host untouched, including any color
/// codes. `{language}`, `{code}`, `{languages}` and `{error}` are
/// substituted by the command layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// Sent after a successful language change.
    #[serde(alias = "language-changed")]
    pub language_changed: String,
    /// Sent to users who have not selected a language yet.
    #[serde(alias = "first-join-welcome")]
    pub first_join_welcome: String,
    /// Sent when the requested language does not exist.
    #[serde(alias = "language-not-found")]
    pub language_not_found: String,
    /// Lists the available language codes.
    #[serde(alias = "available-languages")]
    pub available_languages: String,
    /// Sent after a successful reload.
    #[serde(alias = "reload-success")]
    pub reload_success: String,
    /// Sent when the configuration or the catalog could not be reloaded.
    #[serde(alias = "reload-failed")]
    pub reload_failed: String,
    /// Sent when the sender lacks a permission.
    #[serde(alias = "no-permission")]
    pub no_permission: String,
    /// Sent when a non-player uses a player-only command.
    #[serde(alias = "players-only")]
    pub players_only: String,
}

impl ApiConfig {
    /// The configured token, ignoring blank values.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// Connect timeout as a [`Duration`].
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Read timeout as a [`Duration`].
    pub const fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

impl GuiConfig {
    /// The configured size, or the default when it is not a valid layout.
    pub const fn effective_size(&self) -> usize {
        if self.size == 0 || self.size % 9 != 0 || self.size > 54 {
            DEFAULT_GUI_SIZE
        } else {
            self.size
        }
    }
}

impl CacheConfig {
    /// Cache duration as a [`Duration`].
    pub const fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), TranslateError> {
        ConfigValidator::validate(self)
    }
}
