//! HTTP surface tests
//!
//! Submit -> stats -> redirect through the real route table.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::App;
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use minilinker::api::types::ApiSettings;
use minilinker::api::{self, AppState};
use minilinker::services::{LogLevel, MemoryLogSink, ShortenSettings};
use minilinker::storage::{shared_registry, UrlRecord};

// =============================================================================
// Test Setup
// =============================================================================

fn test_state() -> (AppState, Arc<MemoryLogSink>) {
    let sink = Arc::new(MemoryLogSink::new());
    let settings = ApiSettings {
        base_url: "http://sho.rt".to_string(),
        max_batch_rows: 5,
        log_sink: "memory".to_string(),
    };
    let state = AppState::new(
        shared_registry(),
        ShortenSettings::default(),
        settings,
        sink.clone(),
    );
    (state, sink)
}

macro_rules! init_app {
    ($state:expr) => {{
        let state = $state.clone();
        test::init_service(App::new().configure(move |cfg| api::configure(cfg, &state))).await
    }};
}

// =============================================================================
// Shorten
// =============================================================================

#[actix_rt::test]
async fn test_shorten_single_url_with_defaults() {
    let (state, _) = test_state();
    let app = init_app!(state);

    let req = TestRequest::post()
        .uri("/api/shorten")
        .set_json(json!({ "rows": [{ "url": "https://example.com/page", "validity": "", "shortcode": "" }] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    let entry = &body["data"][0];
    assert_eq!(entry["original"], "https://example.com/page");
    let code = entry["shortcode"].as_str().unwrap();
    assert_eq!(code.len(), 5);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(entry["short_link"], format!("http://sho.rt/{}", code));
    assert_eq!(entry["remaining_minutes"], 30);
    assert_eq!(entry["status"], "active");

    assert_eq!(state.registry.read().len(), 1);
}

#[actix_rt::test]
async fn test_shorten_invalid_url_reports_row() {
    let (state, _) = test_state();
    let app = init_app!(state);

    let req = TestRequest::post()
        .uri("/api/shorten")
        .set_json(json!({ "rows": [{ "url": "not-a-url" }] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3008);
    let errors = body["data"]["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["row"], 1);
    assert_eq!(errors[0]["kind"], "invalid_url");
    assert_eq!(errors[0]["message"], "Row 1: Invalid URL");

    assert!(state.registry.read().is_empty());
}

#[actix_rt::test]
async fn test_shorten_mixed_batch_is_all_or_nothing() {
    let (state, _) = test_state();
    let app = init_app!(state);

    let req = TestRequest::post()
        .uri("/api/shorten")
        .set_json(json!({ "rows": [
            { "url": "https://ok.example.com" },
            { "url": "https://ok2.example.com", "shortcode": "x!" }
        ] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    let errors = body["data"]["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["row"], 2);
    assert_eq!(errors[0]["kind"], "invalid_shortcode");
    assert!(state.registry.read().is_empty());
}

#[actix_rt::test]
async fn test_shorten_rejects_empty_and_oversized_batches() {
    let (state, _) = test_state();
    let app = init_app!(state);

    let req = TestRequest::post()
        .uri("/api/shorten")
        .set_json(json!({ "rows": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1014);

    let rows: Vec<Value> = (0..6)
        .map(|i| json!({ "url": format!("http://h{}.example.com", i) }))
        .collect();
    let req = TestRequest::post()
        .uri("/api/shorten")
        .set_json(json!({ "rows": rows }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1010);

    assert!(state.registry.read().is_empty());
}

#[actix_rt::test]
async fn test_shorten_malformed_json() {
    let (state, _) = test_state();
    let app = init_app!(state);

    let req = TestRequest::post()
        .uri("/api/shorten")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1000);
}

#[actix_rt::test]
async fn test_shorten_accepts_numeric_validity() {
    let (state, _) = test_state();
    let app = init_app!(state);

    let req = TestRequest::post()
        .uri("/api/shorten")
        .set_json(json!({ "rows": [{ "url": "http://a.com", "validity": 10, "shortcode": "num" }] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let registry = state.registry.read();
    let record = registry.get("num").unwrap();
    assert_eq!(record.validity_minutes(), 10);
}

// =============================================================================
// Redirect
// =============================================================================

#[actix_rt::test]
async fn test_shorten_then_redirect() {
    let (state, sink) = test_state();
    let app = init_app!(state);

    let req = TestRequest::post()
        .uri("/api/shorten")
        .set_json(json!({ "rows": [{ "url": "http://a.com", "validity": "10", "shortcode": "mycode" }] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = TestRequest::get().uri("/mycode").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers().get("Location").unwrap(), "http://a.com");

    let messages: Vec<String> = sink.events().into_iter().map(|e| e.message).collect();
    assert!(messages.contains(&"Redirecting shortcode mycode to http://a.com".to_string()));
}

#[actix_rt::test]
async fn test_redirect_expired_code_is_not_found() {
    let (state, sink) = test_state();
    state.registry.write().add(UrlRecord::new(
        "http://go.example.com",
        "go1",
        Utc::now() - Duration::minutes(90),
        30,
    ));
    let app = init_app!(state);

    let req = TestRequest::get().uri("/go1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = test::read_body(resp).await;
    assert_eq!(body, "Invalid or expired link");
    assert_eq!(sink.count_level(LogLevel::Error), 1);
}

#[actix_rt::test]
async fn test_redirect_unknown_and_malformed_codes() {
    let (state, _) = test_state();
    let app = init_app!(state);

    let req = TestRequest::get().uri("/doesnotexist").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = TestRequest::get().uri("/bad-code").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_redirect_head_request() {
    let (state, _) = test_state();
    state
        .registry
        .write()
        .add(UrlRecord::new("https://head.example.com", "hd", Utc::now(), 5));
    let app = init_app!(state);

    let req = TestRequest::default()
        .method(actix_web::http::Method::HEAD)
        .uri("/hd")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[actix_rt::test]
async fn test_shorten_rejects_control_characters() {
    let (state, _) = test_state();
    let app = init_app!(state);

    let req = TestRequest::post()
        .uri("/api/shorten")
        .set_json(json!({ "rows": [{ "url": "http://ex\u{1}ample.com", "shortcode": "ctl" }] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["errors"][0]["kind"], "invalid_url");

    let req = TestRequest::get().uri("/ctl").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_redirect_unencodable_target_is_not_found() {
    let (state, _) = test_state();
    // written straight into the registry, bypassing validation
    state.registry.write().add(UrlRecord::new(
        "http://ex\u{1}ample.com",
        "raw",
        Utc::now(),
        10,
    ));
    let app = init_app!(state);

    let req = TestRequest::get().uri("/raw").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.headers().get("Location").is_none());
    let body = test::read_body(resp).await;
    assert_eq!(body, "Invalid or expired link");
}

// =============================================================================
// Stats & Health
// =============================================================================

#[actix_rt::test]
async fn test_stats_lists_live_and_expired_in_order() {
    let (state, _) = test_state();
    {
        let mut registry = state.registry.write();
        registry.add(UrlRecord::new(
            "http://old.example.com",
            "old",
            Utc::now() - Duration::minutes(120),
            60,
        ));
        registry.add(UrlRecord::new("http://new.example.com", "new", Utc::now(), 60));
    }
    let app = init_app!(state);

    let req = TestRequest::get().uri("/api/stats").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["shortcode"], "old");
    assert_eq!(data[0]["status"], "expired");
    assert!(data[0]["remaining_minutes"].as_i64().unwrap() <= -59);
    assert_eq!(data[1]["shortcode"], "new");
    assert_eq!(data[1]["short_link"], "http://sho.rt/new");
}

#[actix_rt::test]
async fn test_stats_empty() {
    let (state, _) = test_state();
    let app = init_app!(state);

    let req = TestRequest::get().uri("/api/stats").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["code"], 0);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_health_reports_counts() {
    let (state, _) = test_state();
    {
        let mut registry = state.registry.write();
        registry.add(UrlRecord::new("http://a.example.com", "a1", Utc::now(), 10));
        registry.add(UrlRecord::new(
            "http://b.example.com",
            "b1",
            Utc::now() - Duration::hours(1),
            10,
        ));
    }
    let app = init_app!(state);

    let req = TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["records"]["total"], 2);
    assert_eq!(body["data"]["records"]["active"], 1);
    assert_eq!(body["data"]["log_sink"], "memory");
}
