//! End-to-end dispatch tests: the full pipeline (rate check → route match →
//! session resolve → handler → header merge) driven through the axum app.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use stadli_admin::config::AppConfig;
use stadli_admin::http::{build_app, AppState, Stores};
use stadli_admin::render::TemplateCache;
use stadli_admin::stores::{BlobStore, KeyValueStore, RelationalStore, StoreError};
use stadli_admin::{handlers, schema};

fn app_with(config: AppConfig, stores: Stores) -> axum::Router {
    let state = AppState {
        config: Arc::new(config),
        router: Arc::new(handlers::build_router().expect("route table must compile")),
        templates: Arc::new(TemplateCache::builtin().expect("built-in templates must compile")),
        schema: Arc::new(schema::product_schema().expect("embedded schema must parse")),
        stores,
    };
    build_app(state)
}

fn app() -> axum::Router {
    app_with(AppConfig::default(), Stores::in_memory())
}

async fn get(app: &axum::Router, path: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(path)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_home_page_renders_with_security_headers() {
    let app = app();
    let response = get(&app, "/home").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/html; charset=utf-8"
    );
    assert!(response.headers().contains_key("content-security-policy"));
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(
        response.headers().get("referrer-policy").unwrap(),
        "no-referrer"
    );

    let body = body_text(response).await;
    assert!(body.contains("Welcome to Stadli Admin"));
    // Layout pass embedded the page and the nav fragment
    assert!(body.contains("<nav class=\"nav\">"));
}

#[tokio::test]
async fn test_trailing_slash_routes_identically() {
    let app = app();
    let plain = get(&app, "/home").await;
    let slashed = get(&app, "/home/").await;
    assert_eq!(plain.status(), StatusCode::OK);
    assert_eq!(slashed.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_root_redirects_to_home() {
    let app = app();
    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/home");
}

#[tokio::test]
async fn test_capture_route_serves_stub() {
    let app = app();
    let response = get(&app, "/crm/fans/42").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Stub page"));
    assert!(body.contains("crm"));
}

#[tokio::test]
async fn test_unmatched_path_is_404_via_fallback() {
    let app = app();
    let response = get(&app, "/definitely/not/registered").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "Not Found");
}

#[tokio::test]
async fn test_fallback_serves_static_asset() {
    let app = app();
    let response = get(&app, "/styles.css").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/css; charset=utf-8"
    );
}

#[tokio::test]
async fn test_session_cookie_issued_once() {
    let app = app();

    let response = get(&app, "/home").await;
    let cookies: Vec<_> = response.headers().get_all(header::SET_COOKIE).iter().collect();
    assert_eq!(cookies.len(), 1, "exactly one set-cookie on first contact");

    let set_cookie = cookies[0].to_str().unwrap().to_string();
    assert!(set_cookie.starts_with("stadli_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    // Replay with the issued cookie: no re-issue.
    let pair = set_cookie.split(';').next().unwrap().to_string();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/home")
                .header(header::COOKIE, pair)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_rate_limit_rejects_beyond_threshold() {
    let mut config = AppConfig::default();
    config.rate_limit.limit = 3;
    let app = app_with(config, Stores::in_memory());

    for _ in 0..3 {
        let response = get(&app, "/home").await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    let response = get(&app, "/home").await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_upload_roundtrip() {
    let stores = Stores::in_memory();
    let app = app_with(AppConfig::default(), stores.clone());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/upload?key=report.txt")
                .body(Body::from("contents"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["ok"], Value::Bool(true));
    assert_eq!(json["key"], Value::String("report.txt".to_string()));

    assert!(stores.blobs.head("report.txt").await.unwrap());
}

#[tokio::test]
async fn test_upload_requires_put() {
    let app = app();
    let response = get(&app, "/api/upload?key=a").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_upload_requires_key() {
    let app = app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/upload")
                .body(Body::from("contents"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ai_echo_reports_ok() {
    let app = app();
    let response = get(&app, "/api/ai/echo?q=hi").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["ok"], Value::Bool(true));
    assert_eq!(json["q"], Value::String("hi".to_string()));
    assert!(json["result"].is_object());
}

#[tokio::test]
async fn test_ai_echo_defaults_query() {
    let app = app();
    let json = body_json(get(&app, "/api/ai/echo").await).await;
    assert_eq!(json["q"], Value::String("hello".to_string()));
}

struct BrokenRelational;

#[async_trait]
impl RelationalStore for BrokenRelational {
    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("sql down".to_string()))
    }
}

struct BrokenKv;

#[async_trait]
impl KeyValueStore for BrokenKv {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("kv down".to_string()))
    }

    async fn put(&self, _key: &str, _value: &str, _ttl: Option<u64>) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("kv down".to_string()))
    }
}

struct BrokenBlobs;

#[async_trait]
impl BlobStore for BrokenBlobs {
    async fn head(&self, _key: &str) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("blob down".to_string()))
    }

    async fn put(&self, _key: &str, _bytes: Vec<u8>) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("blob down".to_string()))
    }
}

#[tokio::test]
async fn test_health_page_survives_total_store_outage() {
    let mut stores = Stores::in_memory();
    stores.db = Arc::new(BrokenRelational);
    stores.sessions = Arc::new(BrokenKv);
    stores.blobs = Arc::new(BrokenBlobs);
    let app = app_with(AppConfig::default(), stores);

    // The broken sessions KV also backs the rate counter; the request must
    // fail open and still reach the handler.
    let response = get(&app, "/_health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("err"));
    assert!(body.contains("<h1>OK</h1>"));
}

#[tokio::test]
async fn test_wrong_method_on_page_falls_through_to_404() {
    let app = app();
    // /home is GET-only; POST skips it and lands on the fallback.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/home")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
