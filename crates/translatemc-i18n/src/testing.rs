//! In-memory catalog sources for tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::catalog::Catalog;
use crate::error::FetchError;
use crate::fetcher::CatalogSource;

/// A [`CatalogSource`] that replays queued responses in order.
///
/// Once the queue is empty it answers with the fallback catalog if one was
/// set, otherwise with a network error.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Catalog, FetchError>>>,
    fallback: Option<Catalog>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    /// Source with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Source that always answers with `catalog`.
    pub fn always(catalog: Catalog) -> Self {
        Self {
            fallback: Some(catalog),
            ..Self::default()
        }
    }

    /// Queue a successful response.
    #[must_use]
    pub fn then_ok(self, catalog: Catalog) -> Self {
        self.push_ok(catalog);
        self
    }

    /// Queue a failure.
    #[must_use]
    pub fn then_err(self, error: FetchError) -> Self {
        self.push_err(error);
        self
    }

    /// Sleep this long inside every fetch.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a successful response on a shared source.
    pub fn push_ok(&self, catalog: Catalog) {
        self.queue().push_back(Ok(catalog));
    }

    /// Queue a failure on a shared source.
    pub fn push_err(&self, error: FetchError) {
        self.queue().push_back(Err(error));
    }

    /// Number of fetches performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn queue(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<Catalog, FetchError>>> {
        self.responses
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl CatalogSource for ScriptedSource {
    async fn fetch(&self) -> Result<Catalog, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.queue().pop_front();
        match next {
            Some(response) => response,
            None => self
                .fallback
                .clone()
                .ok_or_else(|| FetchError::network("no scripted response")),
        }
    }
}
