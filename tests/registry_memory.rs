mod common;

use counter_shortener::AppError;
use counter_shortener::domain::entities::NewUrlMapping;
use counter_shortener::domain::repositories::UrlMappingRepository;
use counter_shortener::utils::base62;
use counter_shortener::utils::url_normalizer::normalize_url;

#[tokio::test]
async fn test_end_to_end_scenario() {
    let (state, store) = common::create_test_state();

    let c1 = state.registry.shorten_or_get("foo.com").await.unwrap();
    assert_eq!(c1, base62::encode(common::SEED + 1));

    let stored = store.find_by_code(&c1).await.unwrap().unwrap();
    assert_eq!(stored.url, "https://www.foo.com");

    let again = state.registry.shorten_or_get("https://foo.com").await.unwrap();
    assert_eq!(again, c1);

    assert_eq!(state.resolver.resolve(&c1).await.unwrap(), "https://www.foo.com");
    assert_eq!(state.counter.current().await.unwrap(), Some(common::SEED + 1));
}

#[tokio::test]
async fn test_resolve_round_trip() {
    let (state, _store) = common::create_test_state();

    for raw in [
        "example.com",
        "http://www.foo.com",
        "https://bar.com/page",
        "shop.example.org/items?id=7#top",
        "localhost:8080/admin",
    ] {
        let code = state.registry.shorten_or_get(raw).await.unwrap();
        let resolved = state.resolver.resolve(&code).await.unwrap();
        assert_eq!(resolved, normalize_url(raw).unwrap(), "input {raw}");
    }
}

#[tokio::test]
async fn test_distinct_urls_get_distinct_increasing_codes() {
    let (state, _store) = common::create_test_state();

    let a = state.registry.shorten_or_get("a.com").await.unwrap();
    let b = state.registry.shorten_or_get("b.com").await.unwrap();
    let c = state.registry.shorten_or_get("c.com").await.unwrap();

    let ids: Vec<u64> = [a, b, c]
        .iter()
        .map(|code| base62::decode(code).unwrap())
        .collect();
    assert_eq!(ids, vec![common::SEED + 1, common::SEED + 2, common::SEED + 3]);
}

#[tokio::test]
async fn test_resolve_unknown_code() {
    let (state, _store) = common::create_test_state();

    let err = state.resolver.resolve("doesNotExist").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
    assert_eq!(err.to_string(), "Shortened URL not found");
}

#[tokio::test]
async fn test_bootstrap_writes_sentinel_once() {
    let (state, store) = common::create_test_state();

    state.registry.ensure_initialized().await.unwrap();
    state.registry.ensure_initialized().await.unwrap();

    assert_eq!(store.count().await.unwrap(), 1);
    assert_eq!(state.counter.current().await.unwrap(), Some(common::SEED));
    assert_eq!(
        state.resolver.resolve("0").await.unwrap(),
        "https://www.example.com"
    );
}

#[tokio::test]
async fn test_allocation_skips_code_taken_by_sentinel() {
    let taken = base62::encode(common::SEED + 1);
    let store = common::memory_store();
    let state = common::state_with(
        store.clone(),
        None,
        NewUrlMapping::new(taken.clone(), "https://www.example.com"),
    );

    let code = state.registry.shorten_or_get("foo.com").await.unwrap();

    assert_ne!(code, taken);
    assert_eq!(code, base62::encode(common::SEED + 2));
    assert_eq!(
        store.find_by_code(&taken).await.unwrap().unwrap().url,
        "https://www.example.com"
    );
}

#[tokio::test]
async fn test_invalid_url_leaves_store_untouched() {
    let (state, store) = common::create_test_state();

    let err = state.registry.shorten_or_get("ftp://foo.com").await.unwrap_err();

    assert!(matches!(err, AppError::InvalidUrl { .. }));
    assert!(store.is_empty().await.unwrap());
    assert_eq!(state.counter.current().await.unwrap(), None);
}

#[tokio::test]
async fn test_store_outage_surfaces_store_unavailable() {
    let (state, store) = common::create_test_state();
    let code = state.registry.shorten_or_get("foo.com").await.unwrap();

    store.set_offline(true);
    assert!(matches!(
        state.registry.shorten_or_get("bar.com").await.unwrap_err(),
        AppError::StoreUnavailable { .. }
    ));
    assert!(state.resolver.resolve(&code).await.unwrap_err().is_retryable());

    store.set_offline(false);
    assert_eq!(
        state.resolver.resolve(&code).await.unwrap(),
        "https://www.foo.com"
    );
}
