//! Configuration loading utilities

use crate::Config;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use translatemc_common::TranslateError;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "TRANSLATEMC_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[source] TranslateError),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Name of the environment variable
        var: String,
        /// Underlying cause, if any
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for TranslateError {
    fn from(err: ConfigError) -> Self {
        TranslateError::config_with_source("Failed to load configuration", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the default locations.
    ///
    /// Looks at `TRANSLATEMC_CONFIG_PATH`, then `config.yaml`, `config.yml` and
    /// `config.toml` in the working directory, and finally falls back to
    /// defaults. Environment overrides are applied in every case.
    pub fn load() -> Result<Config, ConfigError> {
        match Self::locate() {
            Some(path) => Self::load_from_file(path),
            None => {
                info!("No configuration file found, using defaults");
                Self::finish(Config::default())
            }
        }
    }

    /// Load configuration from a specific YAML or TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        debug!("Loading configuration from {:?}", path);

        let content = std::fs::read_to_string(path)?;
        let config = if is_toml(path) {
            Self::parse_toml(&content)?
        } else {
            Self::parse_yaml(&content)?
        };

        info!("Loaded configuration from {:?}", path);
        Self::finish(config)
    }

    /// Parse a YAML document without applying overrides or validation.
    pub fn parse_yaml(content: &str) -> Result<Config, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a TOML document without applying overrides or validation.
    pub fn parse_toml(content: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply process environment overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |name| env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("TRANSLATEMC_API_URL") {
            config.api.url = url;
        }

        if let Some(token) = lookup("TRANSLATEMC_API_TOKEN") {
            config.api.token = Some(token);
        }

        if let Some(language) = lookup("TRANSLATEMC_DEFAULT_LANGUAGE") {
            config.language.default = language;
        }

        if let Some(duration) = lookup("TRANSLATEMC_CACHE_DURATION") {
            config.cache.duration_secs =
                duration
                    .trim()
                    .parse()
                    .map_err(|e| ConfigError::EnvParseError {
                        var: "TRANSLATEMC_CACHE_DURATION".to_string(),
                        source: Box::new(e),
                    })?;
        }

        Ok(())
    }

    fn finish(mut config: Config) -> Result<Config, ConfigError> {
        Self::apply_env_overrides(&mut config)?;
        config.validate().map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    fn locate() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }

        ["config.yaml", "config.yml", "config.toml"]
            .into_iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use translatemc_common::test_utils::config_fixtures;

    #[test]
    fn test_parse_minimal_yaml_fills_defaults() {
        let config = ConfigLoader::parse_yaml(config_fixtures::minimal_config_yaml()).unwrap();
        assert_eq!(config.api.url, "http://localhost:8080/api");
        assert_eq!(config.api.token(), None);
        assert_eq!(config.language.default, "en");
        assert_eq!(config.cache.duration_secs, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_yaml() {
        let config = ConfigLoader::parse_yaml(config_fixtures::full_config_yaml()).unwrap();
        assert_eq!(config.api.token(), Some("secret-token"));
        assert_eq!(config.api.connect_timeout_secs, 3);
        assert_eq!(config.api.read_timeout_secs, 4);
        assert_eq!(config.language.default, "es");
        assert_eq!(config.cache.duration_secs, 120);
        assert!(!config.features.gui_on_first_join);
        assert_eq!(config.gui.title, "Languages");
        assert_eq!(config.gui.effective_size(), 18);
        assert_eq!(config.messages.language_changed, "Now speaking {language}");
        // Unspecified messages keep their defaults.
        assert!(config.messages.players_only.contains("players"));
    }

    #[test]
    fn test_kebab_case_keys_accepted() {
        let content = r#"
api:
  url: "http://localhost:8080/api"
features:
  gui-on-first-join: false
messages:
  language-changed: "&aLanguage set to {language}"
  first-join-welcome: "&7Choose a language"
"#;
        let config = ConfigLoader::parse_yaml(content).unwrap();
        assert!(!config.features.gui_on_first_join);
        assert_eq!(config.messages.language_changed, "&aLanguage set to {language}");
        assert_eq!(config.messages.first_join_welcome, "&7Choose a language");
    }

    #[test]
    fn test_parse_toml() {
        let content = r#"
[api]
url = "https://translate.example.com"
token = "abc"

[cache]
duration_secs = 60
"#;
        let config = ConfigLoader::parse_toml(content).unwrap();
        assert_eq!(config.api.url, "https://translate.example.com");
        assert_eq!(config.cache.duration_secs, 60);
    }

    #[test]
    fn test_overrides_applied() {
        let vars: HashMap<&str, &str> = [
            ("TRANSLATEMC_API_URL", "https://override.example.com"),
            ("TRANSLATEMC_API_TOKEN", "tok"),
            ("TRANSLATEMC_DEFAULT_LANGUAGE", "de"),
            ("TRANSLATEMC_CACHE_DURATION", " 42 "),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        ConfigLoader::apply_overrides_from(&mut config, |k| vars.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api.url, "https://override.example.com");
        assert_eq!(config.api.token(), Some("tok"));
        assert_eq!(config.language.default, "de");
        assert_eq!(config.cache.duration_secs, 42);
    }

    #[test]
    fn test_bad_duration_override_reported() {
        let mut config = Config::default();
        let err = ConfigLoader::apply_overrides_from(&mut config, |k| {
            (k == "TRANSLATEMC_CACHE_DURATION").then(|| "soon".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("TRANSLATEMC_CACHE_DURATION"));
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let mut config = Config::default();
        config.api.token = Some("   ".to_string());
        assert_eq!(config.api.token(), None);
    }
}
