//! Search orchestrator
//!
//! Request parsing, synonym expansion, language planning, the per-source
//! dispatch matrix, settle-all fan-out with per-task isolation, and
//! response assembly. Plan construction and outcome collection are pure so
//! the dispatch matrix is testable without sockets.

use std::collections::BTreeMap;

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use evisearch_core::{
    GroupedRecords, Record, Source, SourceCounts, group_by_level, is_japanese, reconcile,
};
use evisearch_corpus::{CqMatch, GuidelineMatch, score_cqs, score_guidelines, synonym_index};
use evisearch_sources::{
    SourceError, cinii, europe_pmc, jstage, openalex, pubmed, semantic_scholar, translate,
};

use crate::error::ApiError;
use crate::patient_voice;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub disease: Option<String>,
    pub treatment: Option<String>,
    pub topic: Option<String>,
    #[serde(default)]
    pub multilingual: Option<String>,
    #[serde(default, rename = "patientVoice")]
    pub patient_voice: Option<String>,
}

/// Query-string booleans arrive as text.
pub fn flag(value: &Option<String>) -> bool {
    matches!(value.as_deref(), Some("true") | Some("1"))
}

/// Query terms plus, for structured input, which request field each term
/// came from (drives the per-field translation echo).
#[derive(Debug, PartialEq)]
pub struct QueryParts {
    pub parts: Vec<String>,
    pub fields: Vec<&'static str>,
}

/// Free-form `q` splits on whitespace; otherwise the non-empty structured
/// fields become the parts. No parts is a client error.
pub fn extract_parts(params: &SearchParams) -> Result<QueryParts, ApiError> {
    if let Some(q) = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        return Ok(QueryParts {
            parts: q.split_whitespace().map(String::from).collect(),
            fields: Vec::new(),
        });
    }

    let mut parts = Vec::new();
    let mut fields = Vec::new();
    for (name, value) in [
        ("disease", &params.disease),
        ("treatment", &params.treatment),
        ("topic", &params.topic),
    ] {
        if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            parts.push(v.to_string());
            fields.push(name);
        }
    }
    if parts.is_empty() {
        return Err(ApiError::BadRequest(
            "q or disease/treatment/topic is required".to_string(),
        ));
    }
    Ok(QueryParts { parts, fields })
}

/// One planned adapter invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedCall {
    pub source: Source,
    pub query: String,
}

fn call(source: Source, parts: &[String]) -> PlannedCall {
    // PubMed takes a term expression; the rest take joined text
    let query = match source {
        Source::Pubmed => parts.join(" AND "),
        _ => parts.join(" "),
    };
    PlannedCall { source, query }
}

/// The dispatch matrix. Exactly one of three plans:
///
/// 1. Japanese query, non-multilingual, translation available: PubMed and
///    S2 search the English translation, the four remaining sources the
///    original Japanese, and OpenAlex/EPMC additionally the translation to
///    widen bilingual coverage (8 tasks).
/// 2. Multilingual with translation: every source gets both variants
///    (12 tasks).
/// 3. Otherwise: every source gets the original once (6 tasks).
pub fn build_plan(
    is_ja: bool,
    multilingual: bool,
    parts: &[String],
    translated: &[String],
) -> Vec<PlannedCall> {
    let have_translation = !translated.is_empty();

    if multilingual && have_translation {
        let mut plan = Vec::with_capacity(12);
        for source in Source::ALL {
            plan.push(call(source, parts));
            plan.push(call(source, translated));
        }
        return plan;
    }

    if is_ja && have_translation {
        return vec![
            call(Source::Pubmed, translated),
            call(Source::S2, translated),
            call(Source::Jstage, parts),
            call(Source::Openalex, parts),
            call(Source::Cinii, parts),
            call(Source::Epmc, parts),
            call(Source::Openalex, translated),
            call(Source::Epmc, translated),
        ];
    }

    Source::ALL.iter().map(|&s| call(s, parts)).collect()
}

pub async fn dispatch(planned: &PlannedCall) -> Result<Vec<Record>, SourceError> {
    match planned.source {
        Source::Pubmed => pubmed::search(&planned.query).await,
        Source::Jstage => jstage::search(&planned.query).await,
        Source::S2 => semantic_scholar::search(&planned.query).await,
        Source::Openalex => openalex::search(&planned.query).await,
        Source::Cinii => cinii::search(&planned.query).await,
        Source::Epmc => europe_pmc::search(&planned.query).await,
    }
}

/// Run every planned call concurrently and settle all of them. A failed
/// task never aborts its siblings; each adapter call carries its own
/// deadline, so no global timeout is applied.
pub async fn execute_plan(plan: &[PlannedCall]) -> Vec<(Source, Result<Vec<Record>, SourceError>)> {
    join_all(plan.iter().map(|planned| async move {
        let result = dispatch(planned).await;
        (planned.source, result)
    }))
    .await
}

/// Partition settled outcomes into a flat record batch and the first error
/// observed per source label.
pub fn collect_outcomes(
    outcomes: Vec<(Source, Result<Vec<Record>, SourceError>)>,
) -> (Vec<Record>, BTreeMap<String, String>) {
    let mut records = Vec::new();
    let mut errors: BTreeMap<String, String> = BTreeMap::new();
    for (source, result) in outcomes {
        match result {
            Ok(mut batch) => records.append(&mut batch),
            Err(e) => {
                errors
                    .entry(source.label().to_string())
                    .or_insert_with(|| e.to_string());
            }
        }
    }
    (records, errors)
}

#[derive(Debug, Serialize)]
pub struct MultilingualInfo {
    pub translated: BTreeMap<&'static str, String>,
}

#[derive(Debug, Serialize)]
pub struct SourcesReport {
    pub counts: SourceCounts,
    pub errors: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multilingual: Option<MultilingualInfo>,
    pub total_count: usize,
    pub results: GroupedRecords,
    pub national_guidelines: Vec<GuidelineMatch>,
    pub clinical_questions: Vec<CqMatch>,
    pub sources: SourcesReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_voice: Option<Vec<Record>>,
}

/// The primary orchestration: one request in, one envelope out.
pub async fn run_search(params: SearchParams) -> Result<SearchResponse, ApiError> {
    let multilingual = flag(&params.multilingual);
    let want_patient_voice = flag(&params.patient_voice);
    let QueryParts { parts, fields } = extract_parts(&params)?;

    let joined = parts.join(" ");
    let expanded = synonym_index().expand(parts.iter().map(String::as_str));
    let is_ja = is_japanese(&joined);
    let needs_translation = multilingual || is_ja;
    let (src, tgt) = if is_ja { ("ja", "en") } else { ("en", "ja") };

    // translate each part in parallel; failures silently drop out
    let mut translated = Vec::new();
    let mut translated_fields: BTreeMap<&'static str, String> = BTreeMap::new();
    if needs_translation {
        let outcomes = join_all(parts.iter().map(|p| translate::translate(p, src, tgt))).await;
        for (i, outcome) in outcomes.into_iter().enumerate() {
            if let Some(text) = outcome {
                if multilingual {
                    if let Some(&field) = fields.get(i) {
                        translated_fields.insert(field, text.clone());
                    }
                }
                translated.push(text);
            }
        }
    }

    let plan = build_plan(is_ja, multilingual, &parts, &translated);
    log::debug!("dispatching {} source tasks for '{joined}'", plan.len());
    let outcomes = execute_plan(&plan).await;
    let (flat, errors) = collect_outcomes(outcomes);
    let reconciled = reconcile(flat);
    let total_count = reconciled.records.len();

    // local scoring sees expanded terms plus any translations; the external
    // adapters only ever saw the original parts
    let mut local_terms = expanded;
    local_terms.extend(translated.iter().cloned());
    let national_guidelines = score_guidelines(&local_terms);
    let clinical_questions = score_cqs(&local_terms);

    let patient_voice = if want_patient_voice {
        Some(patient_voice::run(is_ja, &parts, &translated).await)
    } else {
        None
    };

    Ok(SearchResponse {
        query: joined,
        multilingual: multilingual.then_some(MultilingualInfo {
            translated: translated_fields,
        }),
        total_count,
        results: group_by_level(reconciled.records),
        national_guidelines,
        clinical_questions,
        sources: SourcesReport {
            counts: reconciled.counts,
            errors,
        },
        patient_voice,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn count_source(plan: &[PlannedCall], source: Source) -> usize {
        plan.iter().filter(|c| c.source == source).count()
    }

    #[test]
    fn parts_from_q_split_on_whitespace() {
        let params = SearchParams {
            q: Some("stroke  rehabilitation".into()),
            ..Default::default()
        };
        let parts = extract_parts(&params).unwrap();
        assert_eq!(parts.parts, vec!["stroke", "rehabilitation"]);
        assert!(parts.fields.is_empty());
    }

    #[test]
    fn parts_from_structured_fields() {
        let params = SearchParams {
            disease: Some("knee osteoarthritis".into()),
            topic: Some("exercise".into()),
            ..Default::default()
        };
        let parts = extract_parts(&params).unwrap();
        assert_eq!(parts.parts, vec!["knee osteoarthritis", "exercise"]);
        assert_eq!(parts.fields, vec!["disease", "topic"]);
    }

    #[test]
    fn q_wins_over_structured_fields() {
        let params = SearchParams {
            q: Some("stroke".into()),
            disease: Some("asthma".into()),
            ..Default::default()
        };
        let parts = extract_parts(&params).unwrap();
        assert_eq!(parts.parts, vec!["stroke"]);
    }

    #[test]
    fn empty_input_is_client_error() {
        let params = SearchParams::default();
        assert!(matches!(
            extract_parts(&params),
            Err(ApiError::BadRequest(_))
        ));
        let params = SearchParams {
            q: Some("   ".into()),
            ..Default::default()
        };
        assert!(matches!(
            extract_parts(&params),
            Err(ApiError::BadRequest(_))
        ));
    }

    /// English query, no multilingual: all six sources, original query, once.
    #[test]
    fn plan_english_is_six_tasks() {
        let parts = strings(&["stroke", "rehabilitation"]);
        let plan = build_plan(false, false, &parts, &[]);
        assert_eq!(plan.len(), 6);
        for source in Source::ALL {
            assert_eq!(count_source(&plan, source), 1);
        }
        // PubMed takes the AND-joined term, the rest joined text
        assert_eq!(plan[0].source, Source::Pubmed);
        assert_eq!(plan[0].query, "stroke AND rehabilitation");
        assert!(plan[1..].iter().all(|c| c.query == "stroke rehabilitation"));
    }

    /// Japanese query with auto-translation: 8 tasks, translation routed to
    /// PubMed/S2, original kept for the JP-capable sources, and the two
    /// bilingual sources queried both ways.
    #[test]
    fn plan_japanese_autotranslate_is_eight_tasks() {
        let parts = strings(&["脳卒中", "リハビリテーション"]);
        let translated = strings(&["stroke", "rehabilitation"]);
        let plan = build_plan(true, false, &parts, &translated);
        assert_eq!(plan.len(), 8);

        assert_eq!(
            plan[0],
            PlannedCall {
                source: Source::Pubmed,
                query: "stroke AND rehabilitation".into()
            }
        );
        assert_eq!(
            plan[1],
            PlannedCall {
                source: Source::S2,
                query: "stroke rehabilitation".into()
            }
        );
        // original Japanese to the four remaining sources
        for (i, source) in [Source::Jstage, Source::Openalex, Source::Cinii, Source::Epmc]
            .iter()
            .enumerate()
        {
            assert_eq!(plan[2 + i].source, *source);
            assert_eq!(plan[2 + i].query, "脳卒中 リハビリテーション");
        }
        // the widening calls
        assert_eq!(count_source(&plan, Source::Openalex), 2);
        assert_eq!(count_source(&plan, Source::Epmc), 2);
        assert_eq!(plan[6].query, "stroke rehabilitation");
        assert_eq!(plan[7].query, "stroke rehabilitation");
    }

    /// Multilingual with translation: every source dispatched twice.
    #[test]
    fn plan_multilingual_is_twelve_tasks() {
        let parts = strings(&["knee osteoarthritis"]);
        let translated = strings(&["変形性膝関節症"]);
        let plan = build_plan(false, true, &parts, &translated);
        assert_eq!(plan.len(), 12);
        for source in Source::ALL {
            assert_eq!(count_source(&plan, source), 2);
        }
    }

    /// Japanese query whose translation failed: fall back to the original
    /// parts once per source.
    #[test]
    fn plan_japanese_without_translation_is_six_tasks() {
        let parts = strings(&["脳卒中"]);
        let plan = build_plan(true, false, &parts, &[]);
        assert_eq!(plan.len(), 6);
        assert!(plan.iter().all(|c| c.query == "脳卒中"));
    }

    /// One source fails: its error is recorded under its label and the other
    /// records all survive.
    #[test]
    fn collect_isolates_failures() {
        let mut ok = Vec::new();
        for (source, id) in [
            (Source::Pubmed, "1"),
            (Source::Jstage, "j1"),
            (Source::Openalex, "W1"),
            (Source::Cinii, "c1"),
            (Source::Epmc, "e1"),
        ] {
            ok.push((
                source,
                Ok(vec![Record::new(source, id, format!("title {id}"))]),
            ));
        }
        let mut outcomes: Vec<(Source, Result<Vec<Record>, SourceError>)> = ok;
        outcomes.push((
            Source::S2,
            Err(SourceError::Http {
                status: Some(500),
                message: "500 Internal Server Error".into(),
            }),
        ));

        let (records, errors) = collect_outcomes(outcomes);
        assert_eq!(records.len(), 5);
        assert_eq!(errors.len(), 1);
        assert!(errors["s2"].contains("500"));
    }

    /// Only the first error per label is retained.
    #[test]
    fn collect_keeps_first_error_per_label() {
        let outcomes: Vec<(Source, Result<Vec<Record>, SourceError>)> = vec![
            (Source::Epmc, Err(SourceError::Timeout)),
            (
                Source::Epmc,
                Err(SourceError::Http {
                    status: Some(502),
                    message: "bad gateway".into(),
                }),
            ),
        ];
        let (records, errors) = collect_outcomes(outcomes);
        assert!(records.is_empty());
        assert_eq!(errors["epmc"], "request timed out");
    }

    #[test]
    fn flag_parsing() {
        assert!(flag(&Some("true".into())));
        assert!(flag(&Some("1".into())));
        assert!(!flag(&Some("false".into())));
        assert!(!flag(&Some("yes".into())));
        assert!(!flag(&None));
    }
}
