mod common;

use counter_shortener::api::dto::shorten::ShortenResponse;

#[tokio::test]
async fn test_redirect_success() {
    let (state, _store) = common::create_test_state();
    let server = common::test_server(state);

    let body: ShortenResponse = server
        .get("/shorten/http://bar.com/page")
        .add_header("Host", "sho.rt")
        .await
        .json();

    let path = body
        .shortened_url
        .strip_prefix("sho.rt")
        .unwrap()
        .to_string();

    let response = server.get(&path).await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://www.bar.com/page");
}

#[tokio::test]
async fn test_redirect_sentinel() {
    let (state, _store) = common::create_test_state();
    let server = common::test_server(state.clone());

    state.registry.ensure_initialized().await.unwrap();

    let response = server.get("/redirect/0").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://www.example.com");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _store) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/redirect/doesNotExist").await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(response.text(), "Shortened URL not found");
}

#[tokio::test]
async fn test_redirect_store_unavailable() {
    let (state, store) = common::create_test_state();
    let server = common::test_server(state);

    store.set_offline(true);

    let response = server.get("/redirect/67f").await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(response.text(), "Store unavailable");
}
