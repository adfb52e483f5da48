//! The `translate` command
//!
//! - no arguments opens the language selector
//! - `reload` reloads configuration and forces a catalog fetch
//! - anything else is taken as a language code to select

use std::sync::Arc;
use tracing::{debug, info, warn};
use translatemc_common::UserId;
use translatemc_config::ConfigCache;
use translatemc_i18n::TranslationService;

use crate::messages::Messages;
use crate::sender::{CommandSender, RELOAD_PERMISSION};

/// Name the host registers the command under.
pub const COMMAND_NAME: &str = "translate";

const RELOAD_ARG: &str = "reload";

/// What the host should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Show the language selector to the sender.
    OpenSelector,
    /// Send these lines to the sender, in order.
    Reply(Vec<String>),
}

impl CommandOutcome {
    fn line(text: String) -> Self {
        Self::Reply(vec![text])
    }

    /// The reply lines, empty for [`CommandOutcome::OpenSelector`].
    pub fn lines(&self) -> &[String] {
        match self {
            Self::OpenSelector => &[],
            Self::Reply(lines) => lines,
        }
    }
}

/// Handler for `translate`, shared by every sender.
#[derive(Clone)]
pub struct TranslateCommand {
    service: TranslationService,
    config: Arc<ConfigCache>,
}

impl TranslateCommand {
    /// Creates the handler. Messages are read from `config` on every call so
    /// a reload takes effect immediately.
    pub fn new(service: TranslationService, config: Arc<ConfigCache>) -> Self {
        Self { service, config }
    }

    /// Runs the command for `sender` with whitespace-split `args`.
    pub async fn execute(&self, sender: &dyn CommandSender, args: &[&str]) -> CommandOutcome {
        let config = self.config.get();
        let messages = Messages::new(&config.messages);

        let Some(user) = sender.user_id() else {
            return CommandOutcome::line(messages.players_only());
        };

        match args.first() {
            None => CommandOutcome::OpenSelector,
            Some(arg) if arg.eq_ignore_ascii_case(RELOAD_ARG) => {
                if sender.has_permission(RELOAD_PERMISSION) {
                    self.reload().await
                } else {
                    debug!(%user, "Reload refused, missing permission");
                    CommandOutcome::line(messages.no_permission())
                }
            }
            Some(code) => self.select_language(user, code),
        }
    }

    /// Selects `code` for `user` and builds the reply.
    ///
    /// Also used by the selector when a language is clicked.
    pub fn select_language(&self, user: UserId, code: &str) -> CommandOutcome {
        let config = self.config.get();
        let messages = Messages::new(&config.messages);
        let code = code.to_lowercase();

        if self.service.set_user_language(user, &code) {
            let name = self
                .service
                .language(&code)
                .map_or_else(|| code.clone(), |l| l.display_name().to_string());
            info!(%user, code = %code, "Language changed");
            CommandOutcome::line(messages.language_changed(&name))
        } else {
            CommandOutcome::Reply(vec![
                messages.language_not_found(&code),
                messages.available_languages(&self.service.language_codes()),
            ])
        }
    }

    async fn reload(&self) -> CommandOutcome {
        info!("Reloading configuration and translations");

        if let Err(e) = self.config.reload() {
            let config = self.config.get();
            return CommandOutcome::line(Messages::new(&config.messages).reload_failed(&e.to_string()));
        }

        let result = self.service.force_reload().await;
        let config = self.config.get();
        let messages = Messages::new(&config.messages);
        match result {
            Ok(()) => CommandOutcome::line(messages.reload_success()),
            Err(e) => {
                warn!("Translation reload failed: {}", e);
                CommandOutcome::line(messages.reload_failed(&e.to_string()))
            }
        }
    }

    /// Completions for the argument being typed.
    ///
    /// Only the first argument completes: language codes, plus `reload` for
    /// senders allowed to run it, filtered by case-insensitive prefix.
    pub fn complete(&self, sender: &dyn CommandSender, args: &[&str]) -> Vec<String> {
        let [input] = args else {
            return Vec::new();
        };
        let input = input.to_lowercase();

        let mut candidates = self.service.language_codes();
        if sender.has_permission(RELOAD_PERMISSION) {
            candidates.push(RELOAD_ARG.to_string());
        }
        candidates.retain(|c| c.to_lowercase().starts_with(&input));
        candidates
    }
}
