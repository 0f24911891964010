//! API error type mapped onto response status codes

use axum::Json;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed client parameter; 400 with a terse message.
    BadRequest(String),
    /// Per-IP window exceeded; 429 with `Retry-After`.
    RateLimited,
    /// The AI proxy's upstream failed; 502.
    Upstream(String),
    /// Anything unexpected; 500, detail logged server-side only.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            )
                .into_response(),
            Self::RateLimited => {
                let mut resp = (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({ "error": "rate limit exceeded" })),
                )
                    .into_response();
                resp.headers_mut()
                    .insert("retry-after", HeaderValue::from_static("60"));
                resp
            }
            Self::Upstream(message) => (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": message })),
            )
                .into_response(),
            Self::Internal(e) => {
                log::error!("unhandled server error: {e:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::Internal(e)
    }
}
