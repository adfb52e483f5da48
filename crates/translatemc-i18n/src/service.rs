//! Translation cache and resolver
//!
//! [`TranslationService`] owns the current catalog snapshot and the per-user
//! language preferences. Lookups never fail: the worst case is the key itself.
//!
//! The snapshot lives behind an [`ArcSwap`], so a lookup loads one snapshot and
//! answers entirely from it while a refresh may replace it concurrently.
//! Fetch-and-swap runs behind a single async mutex; callers that queued behind
//! a finished attempt share its result instead of fetching again.

use arc_swap::ArcSwap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};
use translatemc_common::UserId;
use translatemc_config::Config;

use crate::catalog::{Catalog, LanguageInfo};
use crate::error::FetchError;
use crate::fetcher::CatalogSource;
use crate::preferences::PreferenceStore;
use crate::refresh::RefreshTask;

/// Plain values the resolver needs from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Language used when a user has none and as the lookup fallback.
    pub default_language: String,
    /// Age after which the catalog is stale.
    pub cache_duration: Duration,
}

impl ServiceSettings {
    /// Settings with the given default language and a 300 second cache.
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            default_language: default_language.into(),
            ..Self::default()
        }
    }

    /// Override the cache duration.
    #[must_use]
    pub const fn with_cache_duration(mut self, cache_duration: Duration) -> Self {
        self.cache_duration = cache_duration;
        self
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            cache_duration: Duration::from_secs(300),
        }
    }
}

impl From<&Config> for ServiceSettings {
    fn from(config: &Config) -> Self {
        Self::new(config.language.default.clone()).with_cache_duration(config.cache.duration())
    }
}

/// Age of the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// No fetch has succeeded yet.
    Uninitialized,
    /// Younger than the cache duration.
    Fresh,
    /// Older than the cache duration.
    Stale,
}

/// What a staleness-gated refresh ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The snapshot was fresh; nothing was fetched.
    NotNeeded,
    /// Another caller's attempt finished while this one waited.
    Shared,
    /// A new snapshot was fetched and swapped in.
    Refreshed,
    /// The fetch failed; the previous snapshot stays in force.
    Failed,
}

#[derive(Debug, Default)]
struct CacheState {
    catalog: Arc<Catalog>,
    refreshed_at: Option<Instant>,
}

impl CacheState {
    fn freshness(&self, cache_duration: Duration) -> Freshness {
        match self.refreshed_at {
            None => Freshness::Uninitialized,
            Some(at) if at.elapsed() > cache_duration => Freshness::Stale,
            Some(_) => Freshness::Fresh,
        }
    }
}

struct Inner {
    settings: ServiceSettings,
    source: Arc<dyn CatalogSource>,
    state: ArcSwap<CacheState>,
    preferences: PreferenceStore,
    refresh_lock: Mutex<()>,
    attempts: AtomicU64,
}

impl Inner {
    fn freshness(&self) -> Freshness {
        self.state.load().freshness(self.settings.cache_duration)
    }

    async fn refresh_if_stale(&self) -> RefreshOutcome {
        if self.freshness() == Freshness::Fresh {
            return RefreshOutcome::NotNeeded;
        }

        let observed = self.attempts.load(Ordering::Acquire);
        let _guard = self.refresh_lock.lock().await;

        if self.attempts.load(Ordering::Acquire) != observed {
            debug!("Catalog refresh finished while waiting, reusing its result");
            return RefreshOutcome::Shared;
        }
        if self.freshness() == Freshness::Fresh {
            return RefreshOutcome::NotNeeded;
        }

        info!("Translation catalog is stale, refreshing");
        match self.fetch_and_swap().await {
            Ok(()) => RefreshOutcome::Refreshed,
            Err(_) => RefreshOutcome::Failed,
        }
    }

    async fn force_reload(&self) -> Result<(), FetchError> {
        let _guard = self.refresh_lock.lock().await;
        info!("Forcing translation catalog reload");
        self.fetch_and_swap().await
    }

    /// Callers must hold `refresh_lock`.
    async fn fetch_and_swap(&self) -> Result<(), FetchError> {
        let result = match self.source.fetch().await {
            Ok(catalog) => {
                info!(
                    keys = catalog.key_count(),
                    languages = ?catalog.language_codes(),
                    "Loaded translation catalog"
                );
                self.state.store(Arc::new(CacheState {
                    catalog: Arc::new(catalog),
                    refreshed_at: Some(Instant::now()),
                }));
                Ok(())
            }
            Err(e) => {
                warn!(
                    error = %e,
                    kind = e.kind(),
                    "Failed to fetch translation catalog, keeping previous snapshot"
                );
                Err(e)
            }
        };

        self.attempts.fetch_add(1, Ordering::AcqRel);
        result
    }
}

/// Process-wide translation cache and resolver.
///
/// Cloning is cheap and every clone shares the same state.
#[derive(Clone)]
pub struct TranslationService {
    inner: Arc<Inner>,
}

impl TranslationService {
    /// Creates an uninitialized service. Nothing is fetched until the first
    /// lookup, refresh, or reload.
    pub fn new(settings: ServiceSettings, source: Arc<dyn CatalogSource>) -> Self {
        Self {
            inner: Arc::new(Inner {
                settings,
                source,
                state: ArcSwap::from_pointee(CacheState::default()),
                preferences: PreferenceStore::new(),
                refresh_lock: Mutex::new(()),
                attempts: AtomicU64::new(0),
            }),
        }
    }

    /// Creates the service and performs the eager initial load.
    ///
    /// A failed load is logged and leaves the service uninitialized; lookups
    /// then fall back to the key until a later refresh succeeds.
    pub async fn connect(settings: ServiceSettings, source: Arc<dyn CatalogSource>) -> Self {
        let service = Self::new(settings, source);
        if let Err(e) = service.force_reload().await {
            warn!("Initial translation catalog load failed: {}", e);
        }
        service
    }

    /// The settings this service was built with.
    pub fn settings(&self) -> &ServiceSettings {
        &self.inner.settings
    }

    /// Resolves `key` for `code`, refreshing first if the catalog is stale.
    ///
    /// Falls back to the default language, then to `key` itself. A failed
    /// refresh is swallowed and the current snapshot answers.
    pub async fn resolve(&self, key: &str, code: &str) -> String {
        if self.freshness() != Freshness::Fresh {
            let inner = Arc::clone(&self.inner);
            if let Err(e) = detached(async move { inner.refresh_if_stale().await }).await {
                error!("Lazy catalog refresh task failed: {}", e);
            }
        }
        self.lookup(key, code)
    }

    /// Resolves `key` in the language `user` selected, or the default.
    pub async fn resolve_for_user(&self, user: &UserId, key: &str) -> String {
        let code = self.user_language(user);
        self.resolve(key, &code).await
    }

    /// The fallback algorithm on the current snapshot, without a staleness check.
    pub fn lookup(&self, key: &str, code: &str) -> String {
        let state = self.inner.state.load();
        state
            .catalog
            .resolve(key, code, &self.inner.settings.default_language)
            .to_string()
    }

    /// Records `code` for `user` if the catalog offers it (any case).
    ///
    /// The catalog's own spelling of the code is stored. Returns `false` and
    /// changes nothing when the code is unknown, including before the first
    /// successful fetch.
    pub fn set_user_language(&self, user: UserId, code: &str) -> bool {
        let state = self.inner.state.load();
        match state.catalog.language(code) {
            Some(language) => {
                self.inner.preferences.set(user, language.code());
                debug!(%user, code = language.code(), "User language selected");
                true
            }
            None => {
                debug!(%user, code, "Rejected unknown language selection");
                false
            }
        }
    }

    /// The language `user` selected, or the default language.
    pub fn user_language(&self, user: &UserId) -> String {
        self.inner
            .preferences
            .get(user)
            .unwrap_or_else(|| self.inner.settings.default_language.clone())
    }

    /// Whether `user` has ever selected a language.
    pub fn has_selected(&self, user: &UserId) -> bool {
        self.inner.preferences.contains(user)
    }

    /// Forgets every user's selection.
    pub fn clear_user_languages(&self) {
        let cleared = self.inner.preferences.len();
        self.inner.preferences.clear();
        info!(cleared, "Cleared user language selections");
    }

    /// Number of users with a selection.
    pub fn selected_user_count(&self) -> usize {
        self.inner.preferences.len()
    }

    /// Whether the catalog offers `code` (any case).
    pub fn is_language_available(&self, code: &str) -> bool {
        self.inner.state.load().catalog.has_language(code)
    }

    /// Languages in service order.
    pub fn languages(&self) -> Vec<LanguageInfo> {
        self.inner.state.load().catalog.languages().to_vec()
    }

    /// Language codes in service order.
    pub fn language_codes(&self) -> Vec<String> {
        self.inner.state.load().catalog.language_codes()
    }

    /// The language record for `code` (any case).
    pub fn language(&self, code: &str) -> Option<LanguageInfo> {
        self.inner.state.load().catalog.language(code).cloned()
    }

    /// The configured default language code.
    pub fn default_language_code(&self) -> &str {
        &self.inner.settings.default_language
    }

    /// All translation keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let state = self.inner.state.load();
        let mut keys: Vec<String> = state.catalog.keys().map(str::to_string).collect();
        keys.sort_unstable();
        keys
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&self.inner.state.load().catalog)
    }

    /// Age classification of the current snapshot.
    pub fn freshness(&self) -> Freshness {
        self.inner.freshness()
    }

    /// When the current snapshot was fetched.
    pub fn last_refresh(&self) -> Option<Instant> {
        self.inner.state.load().refreshed_at
    }

    /// Fetches and swaps unconditionally.
    ///
    /// The fetch runs on its own task, so dropping the returned future does
    /// not abort it.
    pub async fn force_reload(&self) -> Result<(), FetchError> {
        let inner = Arc::clone(&self.inner);
        detached(async move { inner.force_reload().await })
            .await
            .unwrap_or_else(|e| Err(FetchError::network_with_source("Reload task failed", e)))
    }

    /// Refreshes only if the catalog is stale or was never loaded.
    pub async fn refresh_if_stale(&self) -> RefreshOutcome {
        let inner = Arc::clone(&self.inner);
        detached(async move { inner.refresh_if_stale().await })
            .await
            .unwrap_or_else(|e| {
                error!("Catalog refresh task failed: {}", e);
                RefreshOutcome::Failed
            })
    }

    /// Starts the background refresh with period equal to the cache duration.
    pub fn spawn_refresh_task(&self) -> RefreshTask {
        self.spawn_refresh_task_every(self.inner.settings.cache_duration)
    }

    /// Starts the background refresh with a custom period.
    pub fn spawn_refresh_task_every(&self, period: Duration) -> RefreshTask {
        RefreshTask::spawn(self.clone(), period)
    }
}

impl fmt::Debug for TranslationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationService")
            .field("settings", &self.inner.settings)
            .field("freshness", &self.freshness())
            .field("selected_users", &self.inner.preferences.len())
            .finish_non_exhaustive()
    }
}

/// Runs a refresh on its own task so the caller only parks while it runs.
async fn detached<F>(future: F) -> Result<F::Output, tokio::task::JoinError>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(future).await
}
