//! Default values matching the shipped configuration file.

use crate::schema::*;

/// Default language code.
pub const DEFAULT_LANGUAGE: &str = "en";
/// Default cache duration in seconds.
pub const DEFAULT_CACHE_DURATION_SECS: u64 = 300;
/// Default connect and read timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
/// Largest accepted connect or read timeout in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 300;
/// Largest accepted cache duration in seconds: one week.
pub const MAX_CACHE_DURATION_SECS: u64 = 7 * 24 * 60 * 60;
/// Default selector size: three rows of nine.
pub const DEFAULT_GUI_SIZE: usize = 27;

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            language: LanguageConfig::default(),
            cache: CacheConfig::default(),
            features: FeaturesConfig::default(),
            gui: GuiConfig::default(),
            messages: MessagesConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            token: None,
            connect_timeout_secs: DEFAULT_TIMEOUT_SECS,
            read_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            default: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_CACHE_DURATION_SECS,
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            gui_on_first_join: true,
        }
    }
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            title: "&6&lSelect Your Language".to_string(),
            size: DEFAULT_GUI_SIZE,
        }
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            language_changed: "&aYour language has been changed to &e{language}&a!".to_string(),
            first_join_welcome: "&7Please select your preferred language!".to_string(),
            language_not_found: "&cLanguage not found: {code}".to_string(),
            available_languages: "&eAvailable languages: {languages}".to_string(),
            reload_success: "&aConfiguration reloaded successfully!".to_string(),
            reload_failed: "&cReload failed: {error}".to_string(),
            no_permission: "&cYou don't have permission to use this command!".to_string(),
            players_only: "&cThis command can only be used by players!".to_string(),
        }
    }
}
