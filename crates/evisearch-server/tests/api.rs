//! Router-level tests for the HTTP surface
//!
//! Everything here exercises paths that never leave the process: parameter
//! validation, the local registry endpoints, CORS and security headers, and
//! the rate limiter. Live-upstream behavior is covered by the adapter
//! fixtures and the orchestrator's plan/collect unit tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use evisearch_server::{AppState, Config};

fn app() -> Router {
    evisearch_server::routes::router(AppState::new(Config::default()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn search_without_parameters_is_400() {
    let resp = app().oneshot(get("/api/search")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("required"));
}

#[tokio::test]
async fn unknown_path_is_404() {
    let resp = app().oneshot(get("/api/nope")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ai_routes_reject_get() {
    let resp = app().oneshot(get("/api/ai/parse")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn suggest_returns_registry_terms() {
    let resp = app()
        .oneshot(get("/api/suggest?q=%E8%84%B3%E5%8D%92%E4%B8%AD")) // 脳卒中
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let suggestions = body.as_array().unwrap();
    assert!(!suggestions.is_empty());
    assert!(suggestions.len() <= 15);
}

#[tokio::test]
async fn suggest_requires_query() {
    let resp = app().oneshot(get("/api/suggest")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn mesh_requires_two_characters() {
    let resp = app().oneshot(get("/api/mesh?q=a")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cq_list_groups_by_guideline() {
    let resp = app().oneshot(get("/api/cq/list")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let groups = body["groups"].as_array().unwrap();
    assert!(!groups.is_empty());
    assert_eq!(body["totalGuidelines"], groups.len() as u64);
    let total: u64 = groups
        .iter()
        .map(|g| g["cqs"].as_array().unwrap().len() as u64)
        .sum();
    assert_eq!(body["totalCQs"], total);
    // every group's CQs point back at their guideline
    for group in groups {
        let gid = group["guideline"]["id"].as_str().unwrap();
        for cq in group["cqs"].as_array().unwrap() {
            assert_eq!(cq["gid"], gid);
        }
    }
}

#[tokio::test]
async fn cq_list_category_filter() {
    let resp = app().oneshot(get("/api/cq/list?cat=neurology")).await.unwrap();
    let body = body_json(resp).await;
    for group in body["groups"].as_array().unwrap() {
        assert_eq!(group["guideline"]["cat"], "neurology");
    }
}

#[tokio::test]
async fn cq_evidence_requires_question() {
    let resp = app().oneshot(get("/api/cq/evidence")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn translate_requires_text() {
    let resp = app().oneshot(get("/api/translate")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn security_headers_on_every_response() {
    for uri in ["/api/suggest?q=copd", "/api/nope", "/api/search"] {
        let resp = app().oneshot(get(uri)).await.unwrap();
        let headers = resp.headers();
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        assert_eq!(
            headers.get("referrer-policy").unwrap(),
            "strict-origin-when-cross-origin"
        );
    }
}

#[tokio::test]
async fn cors_echoes_allow_listed_origin() {
    let req = Request::builder()
        .uri("/api/suggest?q=copd")
        .header("origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn cors_ignores_unlisted_origin() {
    let req = Request::builder()
        .uri("/api/suggest?q=copd")
        .header("origin", "https://evil.example")
        .body(Body::empty())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert!(resp.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn rate_limit_answers_429_with_retry_after() {
    let mut config = Config::default();
    config.rate_limit.max_requests = 2;
    let app = evisearch_server::routes::router(AppState::new(config));

    for _ in 0..2 {
        let req = Request::builder()
            .uri("/api/suggest?q=copd")
            .header("x-forwarded-for", "1.2.3.4")
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = Request::builder()
        .uri("/api/suggest?q=copd")
        .header("x-forwarded-for", "1.2.3.4")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(resp.headers().get("retry-after").unwrap(), "60");
    // the rejection still carries the security headers
    assert_eq!(
        resp.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );

    // a different client is unaffected
    let req = Request::builder()
        .uri("/api/suggest?q=copd")
        .header("x-forwarded-for", "5.6.7.8")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
