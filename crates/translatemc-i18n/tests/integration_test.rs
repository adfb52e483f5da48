//! Integration tests for translatemc-i18n

use futures::future::join_all;
use mockito::Server;
use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use translatemc_common::test_utils::{catalog_fixtures, init_test_logging, user_fixtures};
use translatemc_common::UserId;
use translatemc_i18n::testing::ScriptedSource;
use translatemc_i18n::{
    Catalog, FetchError, FetcherSettings, Freshness, HttpCatalogSource, LanguageInfo,
    RefreshOutcome, ServiceSettings, TranslationService,
};

fn greeting_catalog(spanish: &str) -> Catalog {
    Catalog::builder()
        .translation("greeting", "en", "Hello")
        .translation("greeting", "es", spanish)
        .language(LanguageInfo::new("en", "English").as_default())
        .language(LanguageInfo::new("es", "Espanol"))
        .build()
}

fn short_cache() -> ServiceSettings {
    ServiceSettings::default().with_cache_duration(Duration::from_secs(10))
}

async fn http_service(server: &Server) -> TranslationService {
    let source = HttpCatalogSource::new(FetcherSettings::new(server.url())).unwrap();
    TranslationService::connect(ServiceSettings::default(), Arc::new(source)).await
}

#[tokio::test]
async fn test_greeting_scenario_over_http() {
    init_test_logging();
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/keys")
        .with_status(200)
        .with_body(catalog_fixtures::sample_payload())
        .create_async()
        .await;

    let service = http_service(&server).await;

    assert_eq!(service.resolve("greeting", "es").await, "Hola");
    assert_eq!(service.resolve("greeting", "fr").await, "Hello");
    assert_eq!(service.resolve("missing.key", "en").await, "missing.key");
    assert_eq!(
        service.language("en").unwrap().avatar_ref(),
        Some("ZW4taGVhZA==")
    );
}

#[tokio::test]
async fn test_cold_start_http_500_degrades_to_keys() {
    init_test_logging();
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/keys")
        .with_status(500)
        .expect_at_least(1)
        .create_async()
        .await;

    let service = http_service(&server).await;

    assert_eq!(service.freshness(), Freshness::Uninitialized);
    assert_eq!(service.resolve("greeting", "en").await, "greeting");
    assert!(!service.is_language_available("en"));
    assert!(!service.set_user_language(user_fixtures::test_user_id(), "en"));
    assert!(service.language_codes().is_empty());
}

#[tokio::test]
async fn test_case_insensitive_language_round_trip() {
    let catalog = Catalog::builder()
        .language(LanguageInfo::new("en", "English").as_default())
        .language(LanguageInfo::new("ES", "Espanol"))
        .build();
    let service =
        TranslationService::connect(ServiceSettings::default(), Arc::new(ScriptedSource::always(catalog)))
            .await;

    assert!(service.is_language_available("es"));
    assert_eq!(service.language_codes(), vec!["en", "ES"]);
    assert_eq!(service.languages()[0].code(), "en");
    assert!(service.languages()[0].is_default());
}

#[tokio::test]
async fn test_user_language_selection() {
    let service = TranslationService::connect(
        ServiceSettings::default(),
        Arc::new(ScriptedSource::always(greeting_catalog("Hola"))),
    )
    .await;
    let user = user_fixtures::test_user_id();

    assert!(!service.has_selected(&user));
    assert_eq!(service.user_language(&user), "en");

    assert!(!service.set_user_language(user, "klingon"));
    assert!(!service.has_selected(&user));
    assert_eq!(service.user_language(&user), "en");

    assert!(service.set_user_language(user, "ES"));
    assert!(service.has_selected(&user));
    assert_eq!(service.user_language(&user), "es");
    assert_eq!(service.resolve_for_user(&user, "greeting").await, "Hola");

    assert!(!service.set_user_language(user, "fr"));
    assert_eq!(service.user_language(&user), "es");

    service.clear_user_languages();
    assert!(!service.has_selected(&user));
    assert_eq!(service.selected_user_count(), 0);
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_catalog() {
    init_test_logging();
    let source = Arc::new(
        ScriptedSource::new()
            .then_ok(greeting_catalog("Hola"))
            .then_err(FetchError::HttpStatus { status: 502 })
            .then_err(FetchError::network("connection reset")),
    );
    let service = TranslationService::connect(ServiceSettings::default(), source.clone()).await;
    let before = service.snapshot();

    assert!(service.force_reload().await.is_err());
    assert!(service.force_reload().await.is_err());

    assert_eq!(source.calls(), 3);
    assert_eq!(*service.snapshot(), *before);
    assert_eq!(service.resolve("greeting", "es").await, "Hola");
    assert_eq!(service.freshness(), Freshness::Fresh);
}

#[tokio::test(start_paused = true)]
async fn test_stale_lookup_refreshes_lazily() {
    let source = Arc::new(
        ScriptedSource::new()
            .then_ok(greeting_catalog("Hola"))
            .then_ok(greeting_catalog("Buenas")),
    );
    let service = TranslationService::connect(short_cache(), source.clone()).await;

    tokio::time::advance(Duration::from_secs(10)).await;
    assert_eq!(service.freshness(), Freshness::Fresh);
    assert_eq!(service.resolve("greeting", "es").await, "Hola");
    assert_eq!(source.calls(), 1);

    tokio::time::advance(Duration::from_secs(1)).await;
    assert_eq!(service.freshness(), Freshness::Stale);
    assert_eq!(service.resolve("greeting", "es").await, "Buenas");
    assert_eq!(source.calls(), 2);
    assert_eq!(service.freshness(), Freshness::Fresh);
}

#[tokio::test(start_paused = true)]
async fn test_stale_lookup_with_failing_fetch_serves_last_good_data() {
    let source = Arc::new(ScriptedSource::new().then_ok(greeting_catalog("Hola")));
    let service = TranslationService::connect(short_cache(), source.clone()).await;
    let refreshed_at = service.last_refresh();

    tokio::time::advance(Duration::from_secs(30)).await;

    assert_eq!(service.resolve("greeting", "es").await, "Hola");
    assert_eq!(service.resolve("greeting", "es").await, "Hola");
    assert_eq!(source.calls(), 3);
    assert_eq!(service.freshness(), Freshness::Stale);
    assert_eq!(service.last_refresh(), refreshed_at);

    source.push_ok(greeting_catalog("Buenas"));
    assert_eq!(service.refresh_if_stale().await, RefreshOutcome::Refreshed);
    assert_eq!(service.lookup("greeting", "es"), "Buenas");
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_lookups_share_one_fetch() {
    let source = Arc::new(
        ScriptedSource::always(greeting_catalog("Hola")).with_delay(Duration::from_millis(200)),
    );
    let service = TranslationService::new(ServiceSettings::default(), source.clone());

    let lookups = (0..16).map(|_| {
        let service = service.clone();
        async move { service.resolve("greeting", "es").await }
    });
    let results = join_all(lookups).await;

    assert!(results.iter().all(|r| r == "Hola"));
    assert_eq!(source.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_outcomes() {
    let source = Arc::new(
        ScriptedSource::always(greeting_catalog("Hola")).with_delay(Duration::from_millis(50)),
    );
    let service = TranslationService::new(short_cache(), source.clone());

    let (first, second) = tokio::join!(service.refresh_if_stale(), service.refresh_if_stale());
    let mut outcomes = [first, second];
    outcomes.sort_by_key(|o| *o == RefreshOutcome::Shared);
    assert_eq!(outcomes, [RefreshOutcome::Refreshed, RefreshOutcome::Shared]);

    assert_eq!(service.refresh_if_stale().await, RefreshOutcome::NotNeeded);
    assert_eq!(source.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_reload_during_lazy_refresh_is_safe() {
    let source = Arc::new(
        ScriptedSource::always(greeting_catalog("Hola")).with_delay(Duration::from_millis(100)),
    );
    let service = TranslationService::new(short_cache(), source.clone());

    let (resolved, reloaded) =
        tokio::join!(service.resolve("greeting", "es"), service.force_reload());

    assert_eq!(resolved, "Hola");
    assert!(reloaded.is_ok());
    assert!(source.calls() <= 2);
    assert_eq!(service.freshness(), Freshness::Fresh);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_selection_for_distinct_users() {
    let service = TranslationService::connect(
        ServiceSettings::default(),
        Arc::new(ScriptedSource::always(greeting_catalog("Hola"))),
    )
    .await;
    let users = user_fixtures::test_user_ids(200);

    let handles: Vec<_> = users
        .iter()
        .enumerate()
        .map(|(i, user)| {
            let service = service.clone();
            let user = *user;
            let code = if i % 2 == 0 { "en" } else { "ES" };
            tokio::spawn(async move { service.set_user_language(user, code) })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap());
    }

    assert_eq!(service.selected_user_count(), users.len());
    for (i, user) in users.iter().enumerate() {
        let expected = if i % 2 == 0 { "en" } else { "es" };
        assert_eq!(service.user_language(user), expected);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_never_see_torn_snapshots() {
    let source = Arc::new(ScriptedSource::always(greeting_catalog("Hola")));
    let service = TranslationService::connect(ServiceSettings::default(), source.clone()).await;

    let writer = {
        let service = service.clone();
        let source = source.clone();
        tokio::spawn(async move {
            for i in 0..50 {
                source.push_ok(greeting_catalog(&format!("Hola {i}")));
                service.force_reload().await.unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move {
                for _ in 0..200 {
                    let snapshot = service.snapshot();
                    let value = snapshot.resolve("greeting", "es", "en");
                    assert!(value.starts_with("Hola"));
                    assert_eq!(snapshot.resolve("greeting", "en", "en"), "Hello");
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();

    writer.await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }
    assert_eq!(service.lookup("greeting", "es"), "Hola 49");
}

#[tokio::test]
async fn test_keys_are_sorted() {
    let service = TranslationService::connect(
        ServiceSettings::default(),
        Arc::new(ScriptedSource::always(
            Catalog::from_json(catalog_fixtures::sample_payload()).unwrap(),
        )),
    )
    .await;

    assert_eq!(service.keys(), vec!["farewell", "greeting", "only.spanish"]);
    assert_eq!(service.default_language_code(), "en");
}

#[test]
fn test_user_id_parses_from_uuid_string() {
    let user: UserId = "6f9619ff-8b86-d011-b42d-00c04fc964ff".parse().unwrap();
    assert_eq!(user, user_fixtures::test_user_id());
}

fn arb_code() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["en", "es", "fr", "de", "pt"]).prop_map(str::to_string)
}

proptest! {
    #[test]
    fn prop_resolution_follows_fallback_chain(
        table in prop::collection::hash_map(
            "[a-z]{1,6}",
            prop::collection::hash_map(arb_code(), "[A-Za-z ]{1,8}", 0..4),
            0..8,
        ),
        probe in "[a-z]{1,6}",
        code in arb_code(),
    ) {
        let catalog = table
            .iter()
            .fold(Catalog::builder(), |builder, (key, values)| {
                values.iter().fold(builder.key(key.clone()), |builder, (c, v)| {
                    builder.translation(key.clone(), c.clone(), v.clone())
                })
            })
            .build();
        let default = "en";
        let resolved = catalog.resolve(&probe, &code, default);

        let by_code: Option<&HashMap<String, String>> = table.get(&probe);
        match by_code {
            None => prop_assert_eq!(resolved, probe.as_str()),
            Some(values) => match (values.get(&code), values.get(default)) {
                (Some(v), _) => prop_assert_eq!(resolved, v.as_str()),
                (None, Some(d)) => {
                    prop_assert_eq!(resolved, d.as_str());
                    prop_assert_eq!(resolved, catalog.resolve(&probe, default, default));
                }
                (None, None) => prop_assert_eq!(resolved, probe.as_str()),
            },
        }
    }
}
