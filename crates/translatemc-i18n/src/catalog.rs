//! Immutable translation catalog snapshots

use std::collections::HashMap;
use tracing::warn;

use crate::error::FetchError;
use crate::payload::CatalogPayload;

/// Review state of a single translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationStatus {
    /// Reviewed and accepted.
    Approved,
    /// Waiting for review.
    Pending,
    /// Any status the service reports that is not one of the above.
    Other,
}

impl TranslationStatus {
    /// Parse the status string used by the remote service.
    pub fn from_wire(status: &str) -> Self {
        match status {
            "approved" => Self::Approved,
            "pending" => Self::Pending,
            _ => Self::Other,
        }
    }
}

/// One translated value for one key in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    value: String,
    status: TranslationStatus,
}

impl TranslationEntry {
    /// Creates a new entry.
    pub fn new(value: impl Into<String>, status: TranslationStatus) -> Self {
        Self {
            value: value.into(),
            status,
        }
    }

    /// Creates an approved entry.
    pub fn approved(value: impl Into<String>) -> Self {
        Self::new(value, TranslationStatus::Approved)
    }

    /// The translated text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The review status.
    pub const fn status(&self) -> TranslationStatus {
        self.status
    }

    /// Whether the entry belongs in a catalog: approved, or carrying text.
    pub fn is_retained(&self) -> bool {
        self.status == TranslationStatus::Approved || !self.value.is_empty()
    }
}

/// A language offered by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageInfo {
    code: String,
    display_name: String,
    is_default: bool,
    avatar_ref: Option<String>,
}

impl LanguageInfo {
    /// Creates a language record.
    pub fn new(code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
            is_default: false,
            avatar_ref: None,
        }
    }

    /// Marks the language as the source language of the catalog.
    #[must_use]
    pub const fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Attaches the opaque avatar token.
    #[must_use]
    pub fn with_avatar_ref(mut self, avatar_ref: impl Into<String>) -> Self {
        self.avatar_ref = Some(avatar_ref.into());
        self
    }

    /// Language code as spelled by the service.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human readable name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Whether the service marks this as its source language.
    pub const fn is_default(&self) -> bool {
        self.is_default
    }

    /// Opaque avatar token for presentation code. Never decoded here.
    pub fn avatar_ref(&self) -> Option<&str> {
        self.avatar_ref.as_deref()
    }

    /// Case-insensitive code comparison.
    pub fn matches(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code)
    }
}

/// Immutable snapshot of every key, language, and value at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    translations: HashMap<String, HashMap<String, TranslationEntry>>,
    languages: Vec<LanguageInfo>,
}

impl Catalog {
    /// An empty catalog, used before the first successful fetch.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Starts building a catalog by hand.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Parses the remote service's JSON document.
    ///
    /// Entries that are neither approved nor non-empty are dropped one by one;
    /// the key itself is kept. Any structural problem fails the whole parse.
    pub fn from_json(body: &str) -> Result<Self, FetchError> {
        let payload: CatalogPayload = serde_json::from_str(body)
            .map_err(|e| FetchError::parse(format!("invalid catalog document: {e}"), e))?;
        Ok(payload.into_catalog())
    }

    /// Translations for a key, by language code.
    pub fn translations_for(&self, key: &str) -> Option<&HashMap<String, TranslationEntry>> {
        self.translations.get(key)
    }

    /// Three-tier lookup without the literal-key fallback.
    ///
    /// Returns the non-empty value for `code`, else the non-empty value for
    /// `default_code`, else `None`. Codes are matched exactly here.
    pub fn lookup(&self, key: &str, code: &str, default_code: &str) -> Option<&str> {
        let by_language = self.translations.get(key)?;

        [code, default_code]
            .into_iter()
            .filter_map(|c| by_language.get(c))
            .map(TranslationEntry::value)
            .find(|v| !v.is_empty())
    }

    /// Full resolution: like [`Catalog::lookup`] but falls back to the key.
    pub fn resolve<'a>(&'a self, key: &'a str, code: &str, default_code: &str) -> &'a str {
        self.lookup(key, code, default_code).unwrap_or(key)
    }

    /// Finds a language by case-insensitive code.
    pub fn language(&self, code: &str) -> Option<&LanguageInfo> {
        self.languages.iter().find(|l| l.matches(code))
    }

    /// Whether a language with this code (any case) is offered.
    pub fn has_language(&self, code: &str) -> bool {
        self.language(code).is_some()
    }

    /// Languages in the order the service listed them.
    pub fn languages(&self) -> &[LanguageInfo] {
        &self.languages
    }

    /// Language codes in the order the service listed them.
    pub fn language_codes(&self) -> Vec<String> {
        self.languages.iter().map(|l| l.code.clone()).collect()
    }

    /// The first language flagged as the service's source language.
    pub fn source_language(&self) -> Option<&LanguageInfo> {
        self.languages.iter().find(|l| l.is_default)
    }

    /// All translation keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.translations.keys().map(String::as_str)
    }

    /// Number of translation keys.
    pub fn key_count(&self) -> usize {
        self.translations.len()
    }

    /// Whether the catalog has neither keys nor languages.
    pub fn is_empty(&self) -> bool {
        self.translations.is_empty() && self.languages.is_empty()
    }
}

/// Incremental catalog construction applying the same retention rules as parsing.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    translations: HashMap<String, HashMap<String, TranslationEntry>>,
    languages: Vec<LanguageInfo>,
}

impl CatalogBuilder {
    /// Registers a key with no translations yet.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.translations.entry(key.into()).or_default();
        self
    }

    /// Adds an entry; entries failing [`TranslationEntry::is_retained`] are skipped.
    #[must_use]
    pub fn entry(
        mut self,
        key: impl Into<String>,
        code: impl Into<String>,
        entry: TranslationEntry,
    ) -> Self {
        let by_language = self.translations.entry(key.into()).or_default();
        if entry.is_retained() {
            by_language.insert(code.into(), entry);
        }
        self
    }

    /// Adds an approved translation.
    #[must_use]
    pub fn translation(
        self,
        key: impl Into<String>,
        code: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.entry(key, code, TranslationEntry::approved(value))
    }

    /// Adds a language; a code already present in any case is ignored.
    #[must_use]
    pub fn language(mut self, language: LanguageInfo) -> Self {
        if self.languages.iter().any(|l| l.matches(&language.code)) {
            warn!("Ignoring duplicate language code '{}'", language.code);
        } else {
            self.languages.push(language);
        }
        self
    }

    /// Finishes the catalog.
    pub fn build(self) -> Catalog {
        Catalog {
            translations: self.translations,
            languages: self.languages,
        }
    }
}
