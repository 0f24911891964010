//! Translation client
//!
//! Wraps the web translation endpoint. The contract is narrow: two-letter
//! language codes, a 5-second deadline, and every failure mode (network,
//! timeout, parse, empty or identity output) collapses to `None` so the
//! search pipeline degrades instead of erroring.

use crate::client::{TRANSLATE_TIMEOUT, http_client};

pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

pub async fn translate(text: &str, src: &str, tgt: &str) -> Option<String> {
    translate_at(DEFAULT_ENDPOINT, text, src, tgt).await
}

pub async fn translate_at(endpoint: &str, text: &str, src: &str, tgt: &str) -> Option<String> {
    let resp = http_client()
        .get(endpoint)
        .query(&[
            ("client", "gtx"),
            ("sl", src),
            ("tl", tgt),
            ("dt", "t"),
            ("q", text),
        ])
        .timeout(TRANSLATE_TIMEOUT)
        .send()
        .await
        .ok()?
        .error_for_status()
        .ok()?;
    let body = resp.text().await.ok()?;
    parse_translation(&body, text)
}

/// The response's first element is a list of segment tuples; the translation
/// is `segment[0]` concatenated across segments. An empty result or one that
/// is case-insensitively identical to the input counts as "no translation".
pub fn parse_translation(body: &str, original: &str) -> Option<String> {
    let v: serde_json::Value = serde_json::from_str(body).ok()?;
    let segments = v.get(0)?.as_array()?;
    let translated: String = segments
        .iter()
        .filter_map(|seg| seg.get(0).and_then(|s| s.as_str()))
        .collect();
    let translated = translated.trim().to_string();
    if translated.is_empty() || translated.to_lowercase() == original.trim().to_lowercase() {
        None
    } else {
        Some(translated)
    }
}
