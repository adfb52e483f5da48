//! `%langs_<params>%` placeholder expansion
//!
//! `params` is either one of the special names below or a translation key:
//!
//! - `player_language`: the user's language code
//! - `player_language_name`: the display name of that language, or the code
//! - anything else: the key resolved in the user's language

use translatemc_common::UserId;
use translatemc_i18n::TranslationService;

/// Placeholder namespace.
pub const IDENTIFIER: &str = "langs";

const PLAYER_LANGUAGE: &str = "player_language";
const PLAYER_LANGUAGE_NAME: &str = "player_language_name";

/// Who a placeholder is being expanded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requester {
    /// A connected user.
    Online(UserId),
    /// A known user who is not connected; resolved in the default language.
    Offline(UserId),
    /// No user context at all.
    Nobody,
}

/// Expands placeholders against a [`TranslationService`].
#[derive(Debug, Clone)]
pub struct PlaceholderExpander {
    service: TranslationService,
}

impl PlaceholderExpander {
    /// Creates an expander.
    pub const fn new(service: TranslationService) -> Self {
        Self { service }
    }

    /// Expands one placeholder's `params`.
    ///
    /// Without a user the result is empty. Offline users get the key resolved
    /// in the default language; the special names are not recognized for
    /// them.
    pub async fn expand(&self, requester: Requester, params: &str) -> String {
        match requester {
            Requester::Nobody => String::new(),
            Requester::Offline(_) => {
                self.service
                    .resolve(params, self.service.default_language_code())
                    .await
            }
            Requester::Online(user) => self.expand_for_user(&user, params).await,
        }
    }

    async fn expand_for_user(&self, user: &UserId, params: &str) -> String {
        if params.eq_ignore_ascii_case(PLAYER_LANGUAGE) {
            return self.service.user_language(user);
        }
        if params.eq_ignore_ascii_case(PLAYER_LANGUAGE_NAME) {
            let code = self.service.user_language(user);
            return self
                .service
                .language(&code)
                .map_or(code, |l| l.display_name().to_string());
        }
        self.service.resolve_for_user(user, params).await
    }

    /// Replaces every `%langs_<params>%` in `text`.
    ///
    /// An opening marker without a closing `%` is left as is.
    pub async fn expand_text(&self, requester: Requester, text: &str) -> String {
        let marker = format!("%{IDENTIFIER}_");
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find(&marker) {
            let after = &rest[start + marker.len()..];
            let Some(end) = after.find('%') else {
                break;
            };
            out.push_str(&rest[..start]);
            out.push_str(&self.expand(requester, &after[..end]).await);
            rest = &after[end + 1..];
        }

        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use translatemc_common::test_utils::user_fixtures;
    use translatemc_i18n::testing::ScriptedSource;
    use translatemc_i18n::{Catalog, LanguageInfo, ServiceSettings};

    async fn expander() -> (PlaceholderExpander, TranslationService) {
        let catalog = Catalog::builder()
            .translation("test.get", "en", "Got it")
            .translation("test.get", "es", "Entendido")
            .translation("player_language", "en", "Your language")
            .language(LanguageInfo::new("en", "English").as_default())
            .language(LanguageInfo::new("es", "Espanol"))
            .build();
        let service = TranslationService::connect(
            ServiceSettings::default(),
            Arc::new(ScriptedSource::always(catalog)),
        )
        .await;
        (PlaceholderExpander::new(service.clone()), service)
    }

    #[tokio::test]
    async fn test_special_placeholders() {
        let (expander, service) = expander().await;
        let user = user_fixtures::test_user_id();
        let online = Requester::Online(user);

        assert_eq!(expander.expand(online, "player_language").await, "en");
        assert_eq!(expander.expand(online, "PLAYER_LANGUAGE_NAME").await, "English");

        service.set_user_language(user, "es");
        assert_eq!(expander.expand(online, "player_language").await, "es");
        assert_eq!(expander.expand(online, "player_language_name").await, "Espanol");
    }

    #[tokio::test]
    async fn test_language_name_falls_back_to_code() {
        let catalog = Catalog::builder().build();
        let service = TranslationService::connect(
            ServiceSettings::new("xx"),
            Arc::new(ScriptedSource::always(catalog)),
        )
        .await;
        let expander = PlaceholderExpander::new(service);
        let online = Requester::Online(user_fixtures::test_user_id());

        assert_eq!(expander.expand(online, "player_language_name").await, "xx");
    }

    #[tokio::test]
    async fn test_keys_resolve_per_requester() {
        let (expander, service) = expander().await;
        let user = user_fixtures::test_user_id();
        service.set_user_language(user, "es");

        assert_eq!(expander.expand(Requester::Online(user), "test.get").await, "Entendido");
        assert_eq!(expander.expand(Requester::Offline(user), "test.get").await, "Got it");
        assert_eq!(
            expander.expand(Requester::Offline(user), "player_language").await,
            "Your language"
        );
        assert_eq!(expander.expand(Requester::Nobody, "test.get").await, "");
        assert_eq!(expander.expand(Requester::Online(user), "no.such.key").await, "no.such.key");
    }

    #[tokio::test]
    async fn test_expand_text() {
        let (expander, service) = expander().await;
        let user = user_fixtures::test_user_id();
        service.set_user_language(user, "es");
        let online = Requester::Online(user);

        assert_eq!(
            expander
                .expand_text(online, "[%langs_player_language%] %langs_test.get%!")
                .await,
            "[es] Entendido!"
        );
        assert_eq!(expander.expand_text(online, "100% sure").await, "100% sure");
        assert_eq!(
            expander.expand_text(online, "open %langs_test.get").await,
            "open %langs_test.get"
        );
    }
}
