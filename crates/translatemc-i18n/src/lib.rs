//! # TranslateMC I18n
//!
//! Remote translation catalog with cached, per-user language resolution.
//!
//! The crate fetches a key → language → value table from a remote service,
//! keeps the latest good copy as an immutable [`Catalog`] snapshot, and answers
//! lookups with a requested-language → default-language → literal-key fallback.
//! Snapshots are swapped atomically; refreshes happen on construction, lazily
//! when a lookup finds the cache stale, on a periodic timer, or on demand.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use translatemc_i18n::{FetcherSettings, HttpCatalogSource, ServiceSettings, TranslationService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = HttpCatalogSource::new(FetcherSettings::new("https://translate.example.com/api"))?;
//! let service = TranslationService::connect(ServiceSettings::default(), Arc::new(source)).await;
//! let _refresh = service.spawn_refresh_task();
//!
//! println!("{}", service.resolve("greeting", "es").await);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod error;
pub mod fetcher;
mod payload;
pub mod preferences;
pub mod refresh;
pub mod service;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use catalog::{Catalog, CatalogBuilder, LanguageInfo, TranslationEntry, TranslationStatus};
pub use error::FetchError;
pub use fetcher::{CatalogSource, FetcherSettings, HttpCatalogSource};
pub use preferences::PreferenceStore;
pub use refresh::RefreshTask;
pub use service::{Freshness, RefreshOutcome, ServiceSettings, TranslationService};
