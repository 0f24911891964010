//! Semantic Scholar adapter (citation aggregator)
//!
//! Graph API paper search. The public tier rate-limits aggressively; a 429
//! here degrades to an empty result set instead of an error so one throttled
//! source never dents the fan-out.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use evisearch_core::{EvidenceLevel, Record, Source, classify_title};

use crate::client::{SEARCH_TIMEOUT, http_client};
use crate::error::SourceError;

const SEARCH_URL: &str = "https://api.semanticscholar.org/graph/v1/paper/search";
const FIELDS: &str = "title,authors,year,venue,publicationTypes,externalIds,citationCount,url";
const MAX_AUTHORS: usize = 5;

static SYSTEMATIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)systematic").expect("systematic regex"));

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Paper>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Paper {
    #[serde(default)]
    paper_id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    authors: Vec<Author>,
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    venue: Option<String>,
    #[serde(default)]
    publication_types: Option<Vec<String>>,
    #[serde(default)]
    external_ids: Option<ExternalIds>,
    #[serde(default)]
    citation_count: Option<u32>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Author {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExternalIds {
    #[serde(rename = "DOI", default)]
    doi: Option<String>,
    #[serde(rename = "PubMed", default)]
    pubmed: Option<String>,
}

pub async fn search(query: &str) -> Result<Vec<Record>, SourceError> {
    let resp = http_client()
        .get(SEARCH_URL)
        .query(&[("query", query), ("limit", "20"), ("fields", FIELDS)])
        .timeout(SEARCH_TIMEOUT)
        .send()
        .await
        .map_err(|e| SourceError::from_reqwest(&e))?;

    // Throttled is benign: degrade to empty rather than failing the source
    if resp.status().as_u16() == 429 {
        log::debug!("semantic scholar throttled, returning empty");
        return Ok(Vec::new());
    }
    let resp = resp
        .error_for_status()
        .map_err(|e| SourceError::from_reqwest(&e))?;
    let body = resp.text().await.map_err(|e| SourceError::from_reqwest(&e))?;
    Ok(parse_search(&body))
}

/// Evidence level from S2 publication-type tokens, falling back to the
/// title cascade when the tokens say nothing.
fn classify_paper(publication_types: &[String], title: &str) -> EvidenceLevel {
    let lowered: Vec<String> = publication_types.iter().map(|t| t.to_lowercase()).collect();
    let has = |needle: &str| lowered.iter().any(|t| t == needle);

    if has("metaanalysis") || has("meta-analysis") {
        EvidenceLevel::SrMa
    } else if has("review") && SYSTEMATIC_RE.is_match(title) {
        EvidenceLevel::SrMa
    } else if has("clinicaltrial") || has("clinical trial") {
        EvidenceLevel::ClinicalTrial
    } else if has("casereport") || has("case report") {
        EvidenceLevel::CaseReport
    } else if has("review") {
        EvidenceLevel::Review
    } else {
        classify_title(title)
    }
}

pub fn parse_search(body: &str) -> Vec<Record> {
    let parsed: SearchResponse = match serde_json::from_str(body) {
        Ok(p) => p,
        Err(e) => {
            log::debug!("semantic scholar response did not parse: {e}");
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for paper in parsed.data {
        let Some(title) = paper.title.filter(|t| !t.is_empty()) else {
            continue;
        };
        let id = paper.paper_id.unwrap_or_default();
        if id.is_empty() {
            continue;
        }

        let mut record = Record::new(Source::S2, id, title);
        record.authors = paper
            .authors
            .into_iter()
            .filter_map(|a| a.name)
            .take(MAX_AUTHORS)
            .collect();
        record.year = paper.year;
        record.journal = paper.venue.unwrap_or_default();
        record.citations = paper.citation_count;
        let types = paper.publication_types.unwrap_or_default();

        let mut pmid = None;
        if let Some(ids) = paper.external_ids {
            if let Some(doi) = ids.doi.as_deref() {
                record.set_doi(doi);
            }
            pmid = ids.pubmed;
        }
        record.url = match (&pmid, &record.doi) {
            (Some(pmid), _) => format!("https://pubmed.ncbi.nlm.nih.gov/{pmid}/"),
            (None, Some(doi)) => format!("https://doi.org/{doi}"),
            (None, None) => paper.url.unwrap_or_default(),
        };

        record.evidence_level = classify_paper(&types, &record.title);
        record.pub_types = types;
        records.push(record);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
      "total": 3,
      "offset": 0,
      "data": [
        {
          "paperId": "abc123",
          "title": "Exercise for knee osteoarthritis: a review",
          "authors": [{"authorId": "1", "name": "J Smith"}, {"authorId": null, "name": "K Lee"}],
          "year": 2021,
          "venue": "Osteoarthritis and Cartilage",
          "publicationTypes": ["Review", "JournalArticle"],
          "externalIds": {"DOI": "10.1016/J.JOCA.2021.01.001", "PubMed": "33000001"},
          "citationCount": 58,
          "url": "https://www.semanticscholar.org/paper/abc123"
        },
        {
          "paperId": "def456",
          "title": "A systematic review of balance training",
          "authors": [],
          "year": 2020,
          "venue": null,
          "publicationTypes": ["Review"],
          "externalIds": null,
          "citationCount": null,
          "url": "https://www.semanticscholar.org/paper/def456"
        },
        {
          "paperId": "ghi789",
          "title": null,
          "authors": [],
          "publicationTypes": null
        }
      ]
    }"#;

    #[test]
    fn parses_papers_and_ids() {
        let records = parse_search(BODY);
        assert_eq!(records.len(), 2); // null title dropped

        let r = &records[0];
        assert_eq!(r.id, "abc123");
        assert_eq!(r.authors, vec!["J Smith", "K Lee"]);
        assert_eq!(r.journal, "Osteoarthritis and Cartilage");
        assert_eq!(r.citations, Some(58));
        assert_eq!(r.doi.as_deref(), Some("10.1016/j.joca.2021.01.001"));
        // PMID known: canonical URL is the PubMed page
        assert_eq!(r.url, "https://pubmed.ncbi.nlm.nih.gov/33000001/");
        assert_eq!(r.evidence_level, EvidenceLevel::Review);
    }

    #[test]
    fn review_with_systematic_title_upgrades() {
        let records = parse_search(BODY);
        let r = &records[1];
        assert_eq!(r.evidence_level, EvidenceLevel::SrMa);
        // no external ids: native URL survives
        assert_eq!(r.url, "https://www.semanticscholar.org/paper/def456");
    }

    #[test]
    fn classify_paper_priority() {
        let t = |raw: &[&str]| raw.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(
            classify_paper(&t(&["MetaAnalysis", "Review"]), "any"),
            EvidenceLevel::SrMa
        );
        assert_eq!(
            classify_paper(&t(&["ClinicalTrial"]), "any"),
            EvidenceLevel::ClinicalTrial
        );
        assert_eq!(
            classify_paper(&t(&["CaseReport"]), "any"),
            EvidenceLevel::CaseReport
        );
        assert_eq!(
            classify_paper(&t(&["Review"]), "plain narrative"),
            EvidenceLevel::Review
        );
        // empty tokens defer to the title cascade
        assert_eq!(
            classify_paper(&[], "A randomized controlled trial"),
            EvidenceLevel::Rct
        );
    }

    #[test]
    fn malformed_body_is_empty() {
        assert!(parse_search("surprise!").is_empty());
        assert!(parse_search("{}").is_empty());
    }
}
