//! OpenAlex adapter (open scholarly graph)

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use evisearch_core::{EvidenceLevel, Record, Source, classify_title};

use crate::client::{SEARCH_TIMEOUT, get_text};
use crate::error::SourceError;

const SEARCH_URL: &str = "https://api.openalex.org/works";
const MAX_AUTHORS: usize = 5;

/// Patterns that upgrade a "review"-typed work to SR/MA, both scripts.
static SR_MA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)systematic|meta[\s-]?analysis|システマティック|メタアナリシス|メタ分析")
        .expect("sr/ma regex")
});

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Work>,
}

#[derive(Debug, Deserialize)]
struct Work {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    publication_year: Option<i32>,
    #[serde(default, rename = "type")]
    work_type: Option<String>,
    #[serde(default)]
    doi: Option<String>,
    #[serde(default)]
    ids: Option<WorkIds>,
    #[serde(default)]
    primary_location: Option<Location>,
    #[serde(default)]
    authorships: Vec<Authorship>,
    #[serde(default)]
    cited_by_count: Option<u32>,
    #[serde(default)]
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WorkIds {
    #[serde(default)]
    pmid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Location {
    #[serde(default)]
    source: Option<LocationSource>,
}

#[derive(Debug, Deserialize)]
struct LocationSource {
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Authorship {
    #[serde(default)]
    author: Option<WorkAuthor>,
}

#[derive(Debug, Deserialize)]
struct WorkAuthor {
    #[serde(default)]
    display_name: Option<String>,
}

pub async fn search(query: &str) -> Result<Vec<Record>, SourceError> {
    let body = get_text(
        SEARCH_URL,
        &[("search", query), ("per-page", "20")],
        SEARCH_TIMEOUT,
    )
    .await?;
    Ok(parse_search(&body))
}

pub fn parse_search(body: &str) -> Vec<Record> {
    let parsed: SearchResponse = match serde_json::from_str(body) {
        Ok(p) => p,
        Err(e) => {
            log::debug!("openalex response did not parse: {e}");
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for work in parsed.results {
        let Some(title) = work.display_name.filter(|t| !t.is_empty()) else {
            continue;
        };
        let Some(id) = work.id.filter(|i| !i.is_empty()) else {
            continue;
        };

        let mut record = Record::new(Source::Openalex, id.clone(), title);
        record.year = work.publication_year;
        record.citations = work.cited_by_count;
        record.language = work.language;
        record.journal = work
            .primary_location
            .and_then(|l| l.source)
            .and_then(|s| s.display_name)
            .unwrap_or_default();
        record.authors = work
            .authorships
            .into_iter()
            .filter_map(|a| a.author.and_then(|a| a.display_name))
            .take(MAX_AUTHORS)
            .collect();
        if let Some(doi) = work.doi.as_deref() {
            record.set_doi(doi);
        }

        // PMID in OpenAlex arrives as a full PubMed URL
        let pmid_url = work.ids.and_then(|i| i.pmid).filter(|p| !p.is_empty());
        record.url = match (pmid_url, &record.doi) {
            (Some(pmid_url), _) => normalize_pmid_url(&pmid_url),
            (None, Some(doi)) => format!("https://doi.org/{doi}"),
            (None, None) => id,
        };

        record.evidence_level = match work.work_type.as_deref() {
            Some("review") => {
                if SR_MA_RE.is_match(&record.title) {
                    EvidenceLevel::SrMa
                } else {
                    EvidenceLevel::Review
                }
            }
            _ => classify_title(&record.title),
        };
        records.push(record);
    }
    records
}

fn normalize_pmid_url(raw: &str) -> String {
    if raw.starts_with("http") {
        raw.to_string()
    } else {
        format!("https://pubmed.ncbi.nlm.nih.gov/{raw}/")
    }
}
