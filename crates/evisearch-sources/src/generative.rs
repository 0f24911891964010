//! Generative-model client backing the AI proxy endpoints
//!
//! POSTs a prompt to the configured endpoint with the caller's API key and
//! returns the first candidate's text. Unlike the bibliographic adapters,
//! failures here surface to the caller (the proxy endpoints answer 502).

use std::time::Duration;

use crate::client::http_client;
use crate::error::SourceError;

const GENERATE_TIMEOUT: Duration = Duration::from_secs(30);

pub async fn generate(endpoint: &str, api_key: &str, prompt: &str) -> Result<String, SourceError> {
    let body = serde_json::json!({
        "contents": [{"parts": [{"text": prompt}]}]
    });
    let resp = http_client()
        .post(endpoint)
        .query(&[("key", api_key)])
        .json(&body)
        .timeout(GENERATE_TIMEOUT)
        .send()
        .await
        .map_err(|e| SourceError::from_reqwest(&e))?
        .error_for_status()
        .map_err(|e| SourceError::from_reqwest(&e))?;
    let body = resp.text().await.map_err(|e| SourceError::from_reqwest(&e))?;
    parse_candidate(&body)
}

/// First candidate text out of the generate response.
pub fn parse_candidate(body: &str) -> Result<String, SourceError> {
    let v: serde_json::Value = serde_json::from_str(body).map_err(SourceError::parse)?;
    v["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| SourceError::Parse("no candidate text in response".into()))
}
