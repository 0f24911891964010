//! Router assembly: routes, CORS, security headers, rate limiting

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::Router;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderValue, Method};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.allowed_origins);

    Router::new()
        .route("/api/search", get(handlers::search_handler))
        .route("/api/mesh", get(handlers::mesh_handler))
        .route("/api/suggest", get(handlers::suggest_handler))
        .route("/api/cq/list", get(handlers::cq_list_handler))
        .route("/api/cq/evidence", get(handlers::cq_evidence_handler))
        .route("/api/translate", get(handlers::translate_handler))
        .route("/api/ai/parse", post(handlers::ai_parse_handler))
        .route("/api/ai/summary", post(handlers::ai_summary_handler))
        .fallback(handlers::not_found)
        // layer order: requests pass security -> cors -> rate limit -> route,
        // so even a 429 goes out with the security headers and CORS echo
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(cors)
        .layer(middleware::from_fn(security_headers))
        .with_state(state)
}

/// Echo only allow-listed origins. The literal `"null"` origin admits pages
/// opened from `file://`.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allowed: Vec<String> = allowed_origins.to_vec();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|o| allowed.iter().any(|a| a == o))
                .unwrap_or(false)
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

async fn security_headers(req: Request, next: Next) -> Response {
    let mut resp = next.run(req).await;
    let headers = resp.headers_mut();
    headers.insert("x-content-type-options", HeaderValue::from_static("nosniff"));
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    headers.insert(
        "referrer-policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    resp
}

/// Client IP for the rate-limit table: the first `X-Forwarded-For` hop when
/// present (the deployment sits behind a proxy), else the socket peer.
fn client_ip(req: &Request) -> IpAddr {
    if let Some(forwarded) = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            if let Ok(ip) = first.trim().parse() {
                return ip;
            }
        }
    }
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let ip = client_ip(&req);
    if state.limiter.check(ip).is_err() {
        log::warn!("rate limit exceeded for {ip}");
        return ApiError::RateLimited.into_response();
    }
    next.run(req).await
}
