//! First-join language prompt

use std::time::Duration;
use tracing::debug;
use translatemc_common::UserId;
use translatemc_config::Config;
use translatemc_i18n::TranslationService;

use crate::messages::Messages;

/// How long the host should wait after a join before prompting.
pub const FIRST_JOIN_DELAY: Duration = Duration::from_secs(1);

/// Prompt for a user who has never picked a language: send `message`, then
/// open the selector, both after `delay`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstJoinPrompt {
    /// Welcome text, color codes included.
    pub message: String,
    /// Delay before sending the message and opening the selector.
    pub delay: Duration,
}

/// Decides whether `user` should be prompted on joining.
pub fn first_join_prompt(
    service: &TranslationService,
    config: &Config,
    user: &UserId,
) -> Option<FirstJoinPrompt> {
    if !config.features.gui_on_first_join || service.has_selected(user) {
        return None;
    }

    debug!(%user, "Prompting user without a language selection");
    Some(FirstJoinPrompt {
        message: Messages::new(&config.messages).first_join_welcome(),
        delay: FIRST_JOIN_DELAY,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use translatemc_common::test_utils::user_fixtures;
    use translatemc_i18n::testing::ScriptedSource;
    use translatemc_i18n::{Catalog, LanguageInfo, ServiceSettings};

    async fn service() -> TranslationService {
        let catalog = Catalog::builder()
            .language(LanguageInfo::new("en", "English"))
            .build();
        TranslationService::connect(
            ServiceSettings::default(),
            Arc::new(ScriptedSource::always(catalog)),
        )
        .await
    }

    #[tokio::test]
    async fn test_prompt_until_language_selected() {
        let service = service().await;
        let config = Config::default();
        let user = user_fixtures::test_user_id();

        let prompt = first_join_prompt(&service, &config, &user).unwrap();
        assert_eq!(prompt.message, "&7Please select your preferred language!");
        assert_eq!(prompt.delay, Duration::from_secs(1));

        assert!(service.set_user_language(user, "en"));
        assert_eq!(first_join_prompt(&service, &config, &user), None);
    }

    #[tokio::test]
    async fn test_feature_can_be_disabled() {
        let service = service().await;
        let mut config = Config::default();
        config.features.gui_on_first_join = false;

        assert_eq!(
            first_join_prompt(&service, &config, &user_fixtures::test_user_id()),
            None
        );
    }
}
