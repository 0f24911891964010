//! PubMed adapter (NCBI E-utilities)
//!
//! Two-step search: `esearch` resolves the term to a PMID list, `esummary`
//! returns the document summaries for those ids.

use evisearch_core::{Record, Source, classify, first_year, strip_html};

use crate::client::{SEARCH_TIMEOUT, get_text};
use crate::error::SourceError;

const ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";
const ESUMMARY_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esummary.fcgi";

const MAX_AUTHORS: usize = 5;
const DEFAULT_RETMAX: usize = 50;

/// Search with the default result ceiling. `term` is the full E-utilities
/// term expression (parts joined by `" AND "`, optional `[pt]` filters).
pub async fn search(term: &str) -> Result<Vec<Record>, SourceError> {
    search_limit(term, DEFAULT_RETMAX).await
}

pub async fn search_limit(term: &str, retmax: usize) -> Result<Vec<Record>, SourceError> {
    let retmax = retmax.to_string();
    let body = get_text(
        ESEARCH_URL,
        &[
            ("db", "pubmed"),
            ("term", term),
            ("retmode", "json"),
            ("retmax", &retmax),
            ("sort", "relevance"),
        ],
        SEARCH_TIMEOUT,
    )
    .await?;
    let ids = parse_esearch(&body)?;
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let id_list = ids.join(",");
    let body = get_text(
        ESUMMARY_URL,
        &[("db", "pubmed"), ("id", &id_list), ("retmode", "json")],
        SEARCH_TIMEOUT,
    )
    .await?;
    Ok(parse_esummary(&body))
}

/// PMID list out of an esearch response.
pub fn parse_esearch(body: &str) -> Result<Vec<String>, SourceError> {
    let v: serde_json::Value = serde_json::from_str(body).map_err(SourceError::parse)?;
    let ids = v["esearchresult"]["idlist"]
        .as_array()
        .ok_or_else(|| SourceError::Parse("esearchresult.idlist missing".into()))?;
    Ok(ids
        .iter()
        .filter_map(|id| id.as_str().map(String::from))
        .collect())
}

/// Records out of an esummary response. Entries that fail to decode are
/// dropped, not fatal.
pub fn parse_esummary(body: &str) -> Vec<Record> {
    let v: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            log::debug!("pubmed esummary did not parse: {e}");
            return Vec::new();
        }
    };
    let result = &v["result"];
    let Some(uids) = result["uids"].as_array() else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for uid in uids.iter().filter_map(|u| u.as_str()) {
        let doc = &result[uid];
        if !doc.is_object() {
            continue;
        }
        let title = strip_html(doc["title"].as_str().unwrap_or_default());
        if title.is_empty() {
            continue;
        }

        let mut record = Record::new(Source::Pubmed, uid, title);
        record.url = format!("https://pubmed.ncbi.nlm.nih.gov/{uid}/");
        record.journal = doc["source"].as_str().unwrap_or_default().to_string();
        record.year = doc["pubdate"].as_str().and_then(first_year);
        if let Some(lang) = doc["lang"][0].as_str() {
            record.language = Some(lang.to_string());
        }
        if let Some(authors) = doc["authors"].as_array() {
            record.authors = authors
                .iter()
                .filter_map(|a| a["name"].as_str())
                .take(MAX_AUTHORS)
                .map(String::from)
                .collect();
        }
        if let Some(types) = doc["pubtype"].as_array() {
            record.pub_types = types
                .iter()
                .filter_map(|t| t.as_str().map(String::from))
                .collect();
        }
        if let Some(ids) = doc["articleids"].as_array() {
            for id in ids {
                if id["idtype"].as_str() == Some("doi") {
                    if let Some(value) = id["value"].as_str() {
                        record.set_doi(value);
                    }
                }
            }
        }
        record.evidence_level = classify(&record.pub_types, &record.title);
        records.push(record);
    }
    records
}
