//! Local relevance scoring over the GL and CQ registries
//!
//! Pure lexical overlap against expanded query terms: exact disease/keyword
//! hits weigh 10, substring containment (either direction) 5, title
//! containment 3. Only positive scores are returned.

use serde::Serialize;

use crate::data::{CQS, GUIDELINES, guideline_by_id};
use crate::model::{ClinicalQuestion, Guideline};

const EXACT_WEIGHT: i32 = 10;
const PARTIAL_WEIGHT: i32 = 5;
const TITLE_WEIGHT: i32 = 3;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidelineMatch {
    #[serde(flatten)]
    pub guideline: &'static Guideline,
    pub score: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CqMatch {
    #[serde(flatten)]
    pub cq: &'static ClinicalQuestion,
    pub score: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guideline_title: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guideline_org: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guideline_url: Option<&'static str>,
}

/// Score one entry: `keywords` in the exact/partial role, `title` in the
/// containment role, summed across all query terms.
fn score_entry(terms: &[String], keywords: &[&str], title: &str) -> i32 {
    let title = title.to_lowercase();
    let mut score = 0;
    for term in terms {
        let term = term.to_lowercase();
        if term.is_empty() {
            continue;
        }
        for kw in keywords {
            let kw = kw.to_lowercase();
            if kw == term {
                score += EXACT_WEIGHT;
            } else if kw.contains(&term) || term.contains(&kw) {
                score += PARTIAL_WEIGHT;
            }
        }
        if title.contains(&term) {
            score += TITLE_WEIGHT;
        }
    }
    score
}

/// Guidelines matching the query terms, best first (score, then year).
pub fn score_guidelines(terms: &[String]) -> Vec<GuidelineMatch> {
    let mut matches: Vec<GuidelineMatch> = GUIDELINES
        .iter()
        .filter_map(|gl| {
            let score = score_entry(terms, gl.diseases, gl.title);
            (score > 0).then_some(GuidelineMatch {
                guideline: gl,
                score,
            })
        })
        .collect();
    matches.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(b.guideline.year.cmp(&a.guideline.year))
    });
    matches
}

/// Clinical questions matching the query terms, enriched with their parent
/// guideline's display fields.
pub fn score_cqs(terms: &[String]) -> Vec<CqMatch> {
    let mut matches: Vec<CqMatch> = CQS
        .iter()
        .filter_map(|cq| {
            let score = score_entry(terms, cq.kw, cq.q);
            if score <= 0 {
                return None;
            }
            let parent = guideline_by_id(cq.gid);
            Some(CqMatch {
                cq,
                score,
                guideline_title: parent.map(|g| g.title),
                guideline_org: parent.map(|g| g.org),
                guideline_url: parent.map(|g| g.url),
            })
        })
        .collect();
    matches.sort_by(|a, b| {
        let year = |m: &CqMatch| guideline_by_id(m.cq.gid).map_or(0, |g| g.year);
        b.score.cmp(&a.score).then(year(b).cmp(&year(a)))
    });
    matches
}
