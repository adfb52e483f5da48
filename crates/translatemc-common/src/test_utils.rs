//! Test utilities and shared test helpers for TranslateMC.
//!
//! This module provides common fixtures that are used across all crates in
//! the workspace for unit and integration testing.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

use crate::UserId;

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// User fixtures.
pub mod user_fixtures {
    use super::UserId;
    use uuid::Uuid;

    /// A fixed user ID.
    pub fn test_user_id() -> UserId {
        UserId(Uuid::from_u128(0x6f96_19ff_8b86_d011_b42d_00c0_4fc9_64ff))
    }

    /// Create multiple distinct, deterministic user IDs.
    pub fn test_user_ids(count: usize) -> Vec<UserId> {
        (0..count)
            .map(|i| UserId(Uuid::from_u128(0x1000_0000 + i as u128)))
            .collect()
    }
}

/// Remote catalog payload fixtures.
pub mod catalog_fixtures {
    /// Payload with `greeting` in English and Spanish, a pending empty French
    /// entry, and three languages where English is the source language.
    pub fn sample_payload() -> &'static str {
        r#"{
  "keys": [
    {
      "key": "greeting",
      "translations": {
        "en": { "value": "Hello", "status": "approved" },
        "es": { "value": "Hola", "status": "approved" },
        "fr": { "value": "", "status": "pending" }
      }
    },
    {
      "key": "farewell",
      "translations": {
        "en": { "value": "Goodbye", "status": "approved" },
        "de": { "value": "Tschuess", "status": "pending" }
      }
    },
    {
      "key": "only.spanish",
      "translations": {
        "es": { "value": "Solo", "status": "approved" }
      }
    }
  ],
  "languages": [
    { "code": "en", "name": "English", "is_source": 1, "minecraft_head": "ZW4taGVhZA==" },
    { "code": "es", "name": "Espanol", "is_source": 0, "minecraft_head": null },
    { "code": "fr", "name": "Francais", "is_source": 0 }
  ]
}"#
    }

    /// Payload whose Spanish greeting differs from [`sample_payload`].
    pub fn updated_payload() -> &'static str {
        r#"{
  "keys": [
    {
      "key": "greeting",
      "translations": {
        "en": { "value": "Hello", "status": "approved" },
        "es": { "value": "Buenas", "status": "approved" }
      }
    }
  ],
  "languages": [
    { "code": "en", "name": "English", "is_source": 1 },
    { "code": "es", "name": "Espanol", "is_source": 0 }
  ]
}"#
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid test configuration as YAML string.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
api:
  url: "http://localhost:8080/api"
"#
    }

    /// Create a full test configuration as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "api:\n",
            "  url: \"https://translate.example.com/api\"\n",
            "  token: \"secret-token\"\n",
            "  connect_timeout_secs: 3\n",
            "  read_timeout_secs: 4\n",
            "\n",
            "language:\n",
            "  default: \"es\"\n",
            "\n",
            "cache:\n",
            "  duration_secs: 120\n",
            "\n",
            "features:\n",
            "  gui_on_first_join: false\n",
            "\n",
            "gui:\n",
            "  title: \"Languages\"\n",
            "  size: 18\n",
            "\n",
            "messages:\n",
            "  language_changed: \"Now speaking {language}\"\n",
            "  first_join_welcome: \"Pick a language\"\n"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_user_ids_are_distinct() {
        let ids = user_fixtures::test_user_ids(16);
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 16);
    }

    #[test]
    fn test_sample_payload_is_json() {
        let value: serde_json::Value =
            serde_json::from_str(catalog_fixtures::sample_payload()).unwrap();
        assert_eq!(value["languages"].as_array().unwrap().len(), 3);
        let _: serde_json::Value =
            serde_json::from_str(catalog_fixtures::updated_payload()).unwrap();
    }
}
