//! Europe PMC adapter (European biomed index)
//!
//! REST search over the core result type. Takes the full query string,
//! which may carry AND/OR parentheses; classification follows the same
//! pubtype-then-title layering as PubMed.

use serde::Deserialize;

use evisearch_core::{Record, Source, classify, first_year, strip_html};

use crate::client::{SEARCH_TIMEOUT, get_text};
use crate::error::SourceError;

const SEARCH_URL: &str = "https://www.ebi.ac.uk/europepmc/webservices/rest/search";
const MAX_AUTHORS: usize = 5;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    result_list: Option<ResultList>,
}

#[derive(Debug, Deserialize)]
struct ResultList {
    #[serde(default)]
    result: Vec<Item>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Item {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    pmid: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author_string: Option<String>,
    #[serde(default)]
    journal_title: Option<String>,
    #[serde(default)]
    pub_year: Option<String>,
    #[serde(default)]
    doi: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    cited_by_count: Option<u32>,
    #[serde(default)]
    pub_type_list: Option<PubTypeList>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PubTypeList {
    #[serde(default)]
    pub_type: Vec<String>,
}

pub async fn search(query: &str) -> Result<Vec<Record>, SourceError> {
    let body = get_text(
        SEARCH_URL,
        &[
            ("query", query),
            ("format", "json"),
            ("resultType", "core"),
            ("pageSize", "20"),
        ],
        SEARCH_TIMEOUT,
    )
    .await?;
    Ok(parse_search(&body))
}

pub fn parse_search(body: &str) -> Vec<Record> {
    let parsed: SearchResponse = match serde_json::from_str(body) {
        Ok(p) => p,
        Err(e) => {
            log::debug!("europe pmc response did not parse: {e}");
            return Vec::new();
        }
    };
    let items = parsed.result_list.map(|l| l.result).unwrap_or_default();

    let mut records = Vec::new();
    for item in items {
        let title = strip_html(item.title.as_deref().unwrap_or_default());
        if title.is_empty() {
            continue;
        }
        let Some(id) = item.id.filter(|i| !i.is_empty()) else {
            continue;
        };

        let mut record = Record::new(Source::Epmc, id.clone(), title);
        record.journal = item.journal_title.unwrap_or_default();
        record.year = item.pub_year.as_deref().and_then(first_year);
        record.language = item.language;
        record.citations = item.cited_by_count;
        if let Some(authors) = item.author_string.as_deref() {
            record.authors = authors
                .trim_end_matches('.')
                .split(", ")
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .take(MAX_AUTHORS)
                .map(String::from)
                .collect();
        }
        if let Some(doi) = item.doi.as_deref() {
            record.set_doi(doi);
        }
        record.pub_types = item.pub_type_list.map(|l| l.pub_type).unwrap_or_default();

        record.url = match (&item.pmid, &record.doi) {
            (Some(pmid), _) if !pmid.is_empty() => {
                format!("https://pubmed.ncbi.nlm.nih.gov/{pmid}/")
            }
            (_, Some(doi)) => format!("https://doi.org/{doi}"),
            _ => {
                let src = item.source.as_deref().unwrap_or("MED");
                format!("https://europepmc.org/article/{src}/{id}")
            }
        };

        record.evidence_level = classify(&record.pub_types, &record.title);
        records.push(record);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use evisearch_core::EvidenceLevel;

    const BODY: &str = r#"{
      "version": "6.9",
      "hitCount": 2,
      "resultList": {
        "result": [
          {
            "id": "34000001",
            "source": "MED",
            "pmid": "34000001",
            "title": "Constraint-induced movement therapy after stroke: a meta-analysis",
            "authorString": "Kwakkel G, Veerbeek JM, van Wegen EEH.",
            "journalTitle": "Lancet Neurol",
            "pubYear": "2021",
            "doi": "10.1016/s1474-4422(21)00025-7",
            "language": "eng",
            "citedByCount": 210,
            "pubTypeList": {"pubType": ["Meta-Analysis", "Journal Article"]}
          },
          {
            "id": "PPR300000",
            "source": "PPR",
            "title": "Community falls prevention: protocol for a cluster trial",
            "pubYear": "2023",
            "pubTypeList": {"pubType": ["Preprint"]}
          }
        ]
      }
    }"#;

    #[test]
    fn parses_core_result() {
        let records = parse_search(BODY);
        assert_eq!(records.len(), 2);

        let r = &records[0];
        assert_eq!(r.id, "34000001");
        assert_eq!(
            r.authors,
            vec!["Kwakkel G", "Veerbeek JM", "van Wegen EEH"]
        );
        assert_eq!(r.journal, "Lancet Neurol");
        assert_eq!(r.year, Some(2021));
        assert_eq!(r.citations, Some(210));
        assert_eq!(r.doi.as_deref(), Some("10.1016/s1474-4422(21)00025-7"));
        assert_eq!(r.url, "https://pubmed.ncbi.nlm.nih.gov/34000001/");
        assert_eq!(r.evidence_level, EvidenceLevel::SrMa);
    }

    #[test]
    fn preprint_without_pmid_gets_native_url() {
        let records = parse_search(BODY);
        let r = &records[1];
        assert_eq!(r.url, "https://europepmc.org/article/PPR/PPR300000");
        // "Preprint" and a bare "cluster trial" match no tier
        assert_eq!(r.evidence_level, EvidenceLevel::Other);
    }

    #[test]
    fn empty_result_list() {
        assert!(parse_search(r#"{"hitCount": 0}"#).is_empty());
        assert!(parse_search("garbage").is_empty());
    }
}
