//! CiNii Research adapter (Japanese multidisciplinary index)
//!
//! OpenSearch JSON. The list view carries no author information, so records
//! from this source rely on the reconciler to pick up authors from a
//! colliding PubMed/OpenAlex record.

use serde::Deserialize;

use evisearch_core::{Record, Source, classify_title, first_year, strip_html};

use crate::client::{SEARCH_TIMEOUT, get_text};
use crate::error::SourceError;

const SEARCH_URL: &str = "https://cir.nii.ac.jp/opensearch/articles";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<Link>,
    #[serde(default, rename = "prism:publicationName")]
    publication_name: Option<String>,
    #[serde(default, rename = "prism:publicationDate")]
    publication_date: Option<String>,
    #[serde(default, rename = "dc:date")]
    date: Option<String>,
    #[serde(default, rename = "dc:identifier")]
    identifiers: Vec<Identifier>,
}

#[derive(Debug, Deserialize)]
struct Link {
    #[serde(default, rename = "@id")]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Identifier {
    #[serde(default, rename = "@type")]
    id_type: Option<String>,
    #[serde(default, rename = "@value")]
    value: Option<String>,
}

pub async fn search(query: &str) -> Result<Vec<Record>, SourceError> {
    let body = get_text(
        SEARCH_URL,
        &[("q", query), ("format", "json"), ("count", "20")],
        SEARCH_TIMEOUT,
    )
    .await?;
    Ok(parse_search(&body))
}

pub fn parse_search(body: &str) -> Vec<Record> {
    let parsed: SearchResponse = match serde_json::from_str(body) {
        Ok(p) => p,
        Err(e) => {
            log::debug!("cinii response did not parse: {e}");
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for (i, item) in parsed.items.into_iter().enumerate() {
        let title = strip_html(item.title.as_deref().unwrap_or_default());
        if title.is_empty() {
            continue;
        }
        let url = item.link.and_then(|l| l.id).unwrap_or_default();
        let id = if url.is_empty() {
            format!("cinii-{i}")
        } else {
            url.clone()
        };

        let mut record = Record::new(Source::Cinii, id, title);
        record.url = url;
        record.journal = item.publication_name.unwrap_or_default();
        record.year = item
            .publication_date
            .or(item.date)
            .as_deref()
            .and_then(first_year);
        for ident in item.identifiers {
            if ident.id_type.as_deref() == Some("cir:DOI") {
                if let Some(value) = ident.value.as_deref() {
                    record.set_doi(value);
                }
            }
        }
        record.language = Some("ja".to_string());
        record.evidence_level = classify_title(&record.title);
        records.push(record);
    }
    records
}
