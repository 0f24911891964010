//! Request handlers for the API routes

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::{Value, json};

use evisearch_corpus::{
    CQS, ClinicalQuestion, GUIDELINES, Guideline, extract_cq_keywords, promote_english, suggest,
};
use evisearch_core::is_japanese;
use evisearch_sources::{generative, mesh, pubmed, translate};

use crate::error::ApiError;
use crate::search::{self, SearchParams};
use crate::state::AppState;

const CQ_EVIDENCE_LIMIT: usize = 5;
const CQ_EVIDENCE_MAX_KW: usize = 4;

/// GET /api/search
pub async fn search_handler(
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let response = search::run_search(params).await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct MeshParams {
    pub q: Option<String>,
}

/// GET /api/mesh - proxy to the MeSH descriptor lookup; failures degrade to
/// an empty list.
pub async fn mesh_handler(Query(params): Query<MeshParams>) -> Result<impl IntoResponse, ApiError> {
    let q = params.q.as_deref().map(str::trim).unwrap_or_default();
    if q.chars().count() < 2 {
        return Err(ApiError::BadRequest(
            "q must be at least 2 characters".to_string(),
        ));
    }
    Ok(Json(mesh::lookup(q).await))
}

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    pub q: Option<String>,
}

/// GET /api/suggest - local autocomplete over CQ keywords and disease names.
pub async fn suggest_handler(
    Query(params): Query<SuggestParams>,
) -> Result<impl IntoResponse, ApiError> {
    let q = params.q.as_deref().map(str::trim).unwrap_or_default();
    if q.is_empty() {
        return Err(ApiError::BadRequest(
            "q must be at least 1 character".to_string(),
        ));
    }
    Ok(Json(suggest(q)))
}

#[derive(Debug, Deserialize)]
pub struct CqListParams {
    pub cat: Option<String>,
}

/// GET /api/cq/list - browse the CQ registry grouped by guideline, with an
/// optional category filter.
pub async fn cq_list_handler(
    Query(params): Query<CqListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let cat = params.cat.as_deref().map(str::trim).filter(|c| !c.is_empty());

    let mut groups: Vec<(&'static Guideline, Vec<&'static ClinicalQuestion>)> = Vec::new();
    for gl in GUIDELINES {
        if cat.is_some_and(|c| c != gl.cat) {
            continue;
        }
        let cqs: Vec<&'static ClinicalQuestion> =
            CQS.iter().filter(|cq| cq.gid == gl.id).collect();
        if !cqs.is_empty() {
            groups.push((gl, cqs));
        }
    }

    let total_cqs: usize = groups.iter().map(|(_, cqs)| cqs.len()).sum();
    let body = json!({
        "totalGuidelines": groups.len(),
        "totalCQs": total_cqs,
        "groups": groups
            .iter()
            .map(|(gl, cqs)| json!({ "guideline": gl, "cqs": cqs }))
            .collect::<Vec<_>>(),
    });
    Ok(Json(body))
}

#[derive(Debug, Deserialize)]
pub struct CqEvidenceParams {
    pub q: Option<String>,
    pub kw: Option<String>,
}

/// Final keyword list for the CQ-evidence query: explicit `kw` wins,
/// otherwise extract from the question and promote Japanese terms.
pub fn cq_evidence_keywords(question: &str, kw: Option<&str>) -> Vec<String> {
    if let Some(kw) = kw.map(str::trim).filter(|k| !k.is_empty()) {
        return kw
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .take(CQ_EVIDENCE_MAX_KW)
            .map(String::from)
            .collect();
    }
    let extracted = extract_cq_keywords(question);
    if extracted.iter().any(|t| is_japanese(t)) {
        promote_english(&extracted)
    } else {
        extracted
    }
}

/// The focused PubMed term: all keywords ANDed, restricted to
/// guideline-grade publication types.
pub fn cq_evidence_query(keywords: &[String]) -> String {
    format!(
        "({}) AND (systematic review[pt] OR meta-analysis[pt] OR randomized controlled trial[pt])",
        keywords.join(" AND ")
    )
}

/// GET /api/cq/evidence - up to 5 SR/MA/RCT records for a CQ question.
pub async fn cq_evidence_handler(
    Query(params): Query<CqEvidenceParams>,
) -> Result<impl IntoResponse, ApiError> {
    let question = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::BadRequest("q is required".to_string()))?;

    let keywords = cq_evidence_keywords(question, params.kw.as_deref());
    if keywords.is_empty() {
        return Ok(Json(json!({ "results": [], "keywords": [] })));
    }

    let query = cq_evidence_query(&keywords);
    let results = match pubmed::search_limit(&query, CQ_EVIDENCE_LIMIT).await {
        Ok(records) => records,
        Err(e) => {
            log::warn!("cq evidence lookup failed: {e}");
            Vec::new()
        }
    };
    Ok(Json(json!({
        "results": results,
        "keywords": keywords,
        "query": query,
    })))
}

#[derive(Debug, Deserialize)]
pub struct TranslateParams {
    pub text: Option<String>,
}

/// GET /api/translate - detects direction from the script; a failed
/// translation echoes the input.
pub async fn translate_handler(
    Query(params): Query<TranslateParams>,
) -> Result<impl IntoResponse, ApiError> {
    let text = params
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("text is required".to_string()))?;

    let (src, tgt) = if is_japanese(text) {
        ("ja", "en")
    } else {
        ("en", "ja")
    };
    let translated = translate::translate(text, src, tgt)
        .await
        .unwrap_or_else(|| text.to_string());
    Ok(Json(json!({ "text": translated, "src": src, "tgt": tgt })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiParseRequest {
    pub query: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSummaryRequest {
    pub results: Option<Value>,
    pub query: Option<String>,
    pub api_key: Option<String>,
}

/// Strip a Markdown code fence so the model's JSON can be parsed.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// POST /api/ai/parse - structure a free-form clinical query via the
/// generative model. Upstream failure is a 502.
pub async fn ai_parse_handler(
    State(state): State<AppState>,
    Json(req): Json<AiParseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let query = req
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::BadRequest("query is required".to_string()))?;
    let api_key = req
        .api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ApiError::BadRequest("apiKey is required".to_string()))?;

    let prompt = format!(
        "Extract the disease, treatment, and topic from this clinical query. \
         Respond with JSON only, using keys \"disease\", \"treatment\", \"topic\"; \
         use null for anything absent. Query: {query}"
    );
    let text = generative::generate(&state.config.ai.endpoint, api_key, &prompt)
        .await
        .map_err(|e| ApiError::Upstream(format!("AI parse failed: {e}")))?;

    let parsed: Value = serde_json::from_str(strip_code_fence(&text))
        .unwrap_or_else(|_| json!({ "topic": query }));
    Ok(Json(parsed))
}

/// POST /api/ai/summary - summarize a result set for the clinician.
pub async fn ai_summary_handler(
    State(state): State<AppState>,
    Json(req): Json<AiSummaryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let query = req.query.as_deref().unwrap_or_default();
    let results = req
        .results
        .ok_or_else(|| ApiError::BadRequest("results is required".to_string()))?;
    let api_key = req
        .api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ApiError::BadRequest("apiKey is required".to_string()))?;

    let prompt = format!(
        "Summarize the strength and direction of the evidence in these search \
         results for the query \"{query}\". Answer in the query's language, \
         4 sentences at most.\n\n{results}"
    );
    let summary = generative::generate(&state.config.ai.endpoint, api_key, &prompt)
        .await
        .map_err(|e| ApiError::Upstream(format!("AI summary failed: {e}")))?;
    Ok(Json(json!({ "summary": summary })))
}

/// Fallback for unknown paths.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}
