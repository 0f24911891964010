//! MeSH term lookup (NLM)
//!
//! Suggest-style proxy: a query maps to up to ten descriptor labels.
//! Failures of any kind produce the empty list.

use serde::Deserialize;

use crate::client::{SEARCH_TIMEOUT, http_client};

pub const DEFAULT_ENDPOINT: &str = "https://id.nlm.nih.gov/mesh/lookup/term";

#[derive(Debug, Deserialize)]
struct Descriptor {
    #[serde(default)]
    label: Option<String>,
}

pub async fn lookup(query: &str) -> Vec<String> {
    lookup_at(DEFAULT_ENDPOINT, query).await
}

pub async fn lookup_at(endpoint: &str, query: &str) -> Vec<String> {
    let resp = http_client()
        .get(endpoint)
        .query(&[("label", query), ("match", "contains"), ("limit", "10")])
        .timeout(SEARCH_TIMEOUT)
        .send()
        .await
        .and_then(|r| r.error_for_status());
    let body = match resp {
        Ok(r) => match r.text().await {
            Ok(b) => b,
            Err(_) => return Vec::new(),
        },
        Err(e) => {
            log::debug!("mesh lookup failed: {e}");
            return Vec::new();
        }
    };
    parse_lookup(&body)
}

pub fn parse_lookup(body: &str) -> Vec<String> {
    let descriptors: Vec<Descriptor> = serde_json::from_str(body).unwrap_or_default();
    descriptors.into_iter().filter_map(|d| d.label).collect()
}
