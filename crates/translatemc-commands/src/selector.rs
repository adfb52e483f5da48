//! Language selector model
//!
//! The host renders the selector however it likes; this module decides what
//! goes in which slot and which code a slot selects.

use translatemc_common::UserId;
use translatemc_config::GuiConfig;
use translatemc_i18n::{LanguageInfo, TranslationService};

/// One selectable language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorEntry {
    /// Zero-based slot index.
    pub slot: usize,
    /// The language shown in the slot, avatar reference included.
    pub language: LanguageInfo,
    /// Whether this is the viewer's current language.
    pub is_current: bool,
}

impl SelectorEntry {
    /// Description lines shown under the language name.
    pub fn lore(&self) -> Vec<String> {
        let mut lines = vec![format!("Code: {}", self.language.code())];
        if self.language.is_default() {
            lines.push("Default Language".to_string());
        }
        lines.push(String::new());
        lines.push(if self.is_current {
            "Currently Selected".to_string()
        } else {
            "Click to select".to_string()
        });
        lines
    }
}

/// Snapshot of the selector for one viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorView {
    /// Title, color codes included.
    pub title: String,
    /// Slot count.
    pub size: usize,
    /// Languages in service order; extras beyond `size` are left out.
    pub entries: Vec<SelectorEntry>,
}

impl SelectorView {
    /// Builds the selector `user` would see right now.
    pub fn build(service: &TranslationService, gui: &GuiConfig, user: &UserId) -> Self {
        let size = gui.effective_size();
        let current = service.user_language(user);

        let entries = service
            .languages()
            .into_iter()
            .take(size)
            .enumerate()
            .map(|(slot, language)| SelectorEntry {
                slot,
                is_current: language.matches(&current),
                language,
            })
            .collect();

        Self {
            title: gui.title.clone(),
            size,
            entries,
        }
    }

    /// The language code behind `slot`, if the slot is filled.
    pub fn code_at(&self, slot: usize) -> Option<&str> {
        self.entries
            .get(slot)
            .map(|entry| entry.language.code())
    }
}
