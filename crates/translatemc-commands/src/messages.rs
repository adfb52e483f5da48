//! Message template rendering
//!
//! Templates come from configuration and may contain `&`-prefixed color
//! codes. They are passed on untouched; only `{name}` placeholders are
//! substituted here.

use translatemc_config::MessagesConfig;

/// Substitutes each `{name}` in `template` with its value.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{name}}}"), value)
    })
}

/// Removes `&x` color codes, for plain-text outputs such as a terminal.
pub fn strip_color_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '&' && chars.peek().is_some_and(char::is_ascii_alphanumeric) {
            chars.next();
            continue;
        }
        out.push(c);
    }
    out
}

/// Typed access to the configured templates.
#[derive(Debug, Clone, Copy)]
pub struct Messages<'a> {
    config: &'a MessagesConfig,
}

impl<'a> Messages<'a> {
    /// Wraps the configured templates.
    pub const fn new(config: &'a MessagesConfig) -> Self {
        Self { config }
    }

    /// Confirmation after a language change.
    pub fn language_changed(&self, language_name: &str) -> String {
        render(&self.config.language_changed, &[("language", language_name)])
    }

    /// Rejection of an unknown code.
    pub fn language_not_found(&self, code: &str) -> String {
        render(&self.config.language_not_found, &[("code", code)])
    }

    /// List of the codes a user may pick.
    pub fn available_languages(&self, codes: &[String]) -> String {
        let joined = codes.join(", ");
        render(&self.config.available_languages, &[("languages", joined.as_str())])
    }

    /// Prompt for users who never chose a language.
    pub fn first_join_welcome(&self) -> String {
        self.config.first_join_welcome.clone()
    }

    /// Confirmation after a reload.
    pub fn reload_success(&self) -> String {
        self.config.reload_success.clone()
    }

    /// Report of a failed reload.
    pub fn reload_failed(&self, error: &str) -> String {
        render(&self.config.reload_failed, &[("error", error)])
    }

    /// Refusal for missing permissions.
    pub fn no_permission(&self) -> String {
        self.config.no_permission.clone()
    }

    /// Refusal for senders that are not players.
    pub fn players_only(&self) -> String {
        self.config.players_only.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_every_occurrence() {
        assert_eq!(
            render("{a} and {a} or {b}", &[("a", "x"), ("b", "y")]),
            "x and x or y"
        );
        assert_eq!(render("{unknown}", &[("a", "x")]), "{unknown}");
    }

    #[test]
    fn test_strip_color_codes() {
        assert_eq!(
            strip_color_codes("&aYour language is &eEspanol&a!"),
            "Your language is Espanol!"
        );
        assert_eq!(strip_color_codes("Tom & Jerry"), "Tom & Jerry");
        assert_eq!(strip_color_codes("trailing &"), "trailing &");
    }

    #[test]
    fn test_default_templates() {
        let config = MessagesConfig::default();
        let messages = Messages::new(&config);

        assert_eq!(
            messages.language_changed("Espanol"),
            "&aYour language has been changed to &eEspanol&a!"
        );
        assert_eq!(messages.language_not_found("xx"), "&cLanguage not found: xx");
        assert_eq!(
            messages.available_languages(&["en".to_string(), "es".to_string()]),
            "&eAvailable languages: en, es"
        );
        assert_eq!(messages.reload_failed("timeout"), "&cReload failed: timeout");
    }
}
