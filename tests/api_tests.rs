mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use common::{three_platform_config, unreachable_config};
use falcon_lookup::{
    core::{engine::Engine, error::LookupError},
    server::{api::handle_panic, router},
};
use httpmock::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(engine: Engine) -> Router {
    router(Arc::new(engine))
}

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn json_body(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn missing_email_is_bad_request() {
    let resp = get(app(Engine::new(unreachable_config()).unwrap()), "/lookup").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(resp).await,
        json!({ "error": "Email parameter is required" })
    );
}

#[tokio::test]
async fn malformed_email_is_bad_request_without_probing() {
    let server = MockServer::start_async().await;
    let catch_all = server
        .mock_async(|when, then| {
            when.path_contains("/");
            then.status(200);
        })
        .await;
    let engine = Engine::new(three_platform_config(&server.base_url(), 2_000)).unwrap();

    let resp = get(app(engine), "/lookup?email=not-an-email").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await, json!({ "error": "Invalid email format" }));
    assert_eq!(catch_all.hits_async().await, 0);
}

#[tokio::test]
async fn all_sources_down_still_returns_report() {
    let resp = get(
        app(Engine::new(unreachable_config()).unwrap()),
        "/lookup?email=tester%40example.com",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );

    let body = json_body(resp).await;
    assert_eq!(body["email"], "tester@example.com");
    assert_eq!(body["identity"]["exists"], false);
    assert!(body["identity"].get("display_name").is_none());
    assert_eq!(body["breaches"], json!([]));
    assert_eq!(body["reputation_score"], 50);
    assert_eq!(body["risk_tier"], "HIGH");

    let platforms = body["platforms"].as_array().unwrap();
    assert_eq!(platforms.len(), 3);
    for (platform, name) in platforms.iter().zip(["Alpha", "Beta", "Gamma"]) {
        assert_eq!(platform["platform_name"], name);
        assert_eq!(platform["exists"], false);
        assert_eq!(platform["extra"], json!({}));
        assert!(platform.get("profile_url").is_none());
        assert!(platform.get("username").is_none());
    }
}

#[tokio::test]
async fn preflight_gets_permissive_cors() {
    let resp = app(Engine::new(unreachable_config()).unwrap())
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/lookup")
                .header(header::ORIGIN, "https://dashboard.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
    assert!(resp
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn lookup_response_carries_cors_origin() {
    let resp = app(Engine::new(unreachable_config()).unwrap())
        .oneshot(
            Request::builder()
                .uri("/lookup?email=tester%40example.com")
                .header(header::ORIGIN, "https://dashboard.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn health_reports_ok() {
    let resp = get(app(Engine::new(unreachable_config()).unwrap()), "/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "falcon-lookup");
}

#[tokio::test]
async fn internal_faults_are_generic() {
    let resp = LookupError::Timeout.into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(resp).await, json!({ "error": "Internal server error" }));

    let resp = handle_panic(Box::new("probe exploded"));
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(resp).await, json!({ "error": "Internal server error" }));
}
