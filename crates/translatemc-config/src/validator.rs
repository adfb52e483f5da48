//! Runtime validation of loaded configuration.

use crate::defaults::{MAX_CACHE_DURATION_SECS, MAX_TIMEOUT_SECS};
use crate::schema::Config;
use translatemc_common::TranslateError;
use unic_langid::LanguageIdentifier;
use url::Url;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> Result<(), TranslateError> {
        validate_api_url(&config.api.url)?;
        validate_language_code(&config.language.default)?;

        validate_range(
            config.cache.duration_secs,
            MAX_CACHE_DURATION_SECS,
            "Cache duration",
            "cache.duration_secs",
        )?;
        validate_range(
            config.api.connect_timeout_secs,
            MAX_TIMEOUT_SECS,
            "Connect timeout",
            "api.connect_timeout_secs",
        )?;
        validate_range(
            config.api.read_timeout_secs,
            MAX_TIMEOUT_SECS,
            "Read timeout",
            "api.read_timeout_secs",
        )?;

        Ok(())
    }
}

fn validate_range(value: u64, max: u64, what: &str, field: &str) -> Result<(), TranslateError> {
    if value == 0 {
        return Err(TranslateError::validation_field(
            format!("{what} must be greater than 0"),
            field,
        ));
    }
    if value > max {
        return Err(TranslateError::validation_field(
            format!("{what} must be at most {max} seconds"),
            field,
        ));
    }
    Ok(())
}

/// Validates that the API base URL is an absolute http(s) URL.
pub fn validate_api_url(raw: &str) -> Result<(), TranslateError> {
    if raw.trim().is_empty() {
        return Err(TranslateError::validation_field(
            "API URL cannot be empty",
            "api.url",
        ));
    }

    let parsed = Url::parse(raw).map_err(|e| {
        TranslateError::validation_field(format!("Invalid API URL '{raw}': {e}"), "api.url")
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(TranslateError::validation_field(
            format!("Unsupported API URL scheme '{other}'"),
            "api.url",
        )),
    }
}

/// Validates that a language code is a well-formed language identifier.
pub fn validate_language_code(code: &str) -> Result<(), TranslateError> {
    if code.trim().is_empty() {
        return Err(TranslateError::validation_field(
            "Default language cannot be empty",
            "language.default",
        ));
    }

    code.parse::<LanguageIdentifier>().map(|_| ()).map_err(|_| {
        TranslateError::validation_field(
            format!("Invalid language code '{code}'"),
            "language.default",
        )
    })
}
