//! CQ keyword extraction
//!
//! Turns a clinical-question sentence into a handful of search terms for
//! the focused PubMed query. Japanese questions yield katakana runs, kanji
//! compounds, and embedded acronyms; English questions tokenize on
//! whitespace. Both paths drop a closed stop-list.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use evisearch_core::is_japanese;

use crate::synonyms::synonym_index;

const MAX_JA_TERMS: usize = 3;
const MAX_EN_TERMS: usize = 4;

static PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:CQ|Q)\d+[.:：\s]*").expect("prefix regex"));
static KATAKANA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Katakana}ー]{2,}").expect("katakana regex"));
static KANJI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Han}々]{2,}").expect("kanji regex"));
static LATIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9-]+").expect("latin regex"));
static ASCII_PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[!-/:-@\[-`{-~]").expect("punct regex"));

/// Kanji compounds that carry no search value in CQ sentences.
static JA_STOPLIST: &[&str] = &[
    "患者", "対象", "効果", "推奨", "有効", "安全", "実施", "使用", "改善",
    "評価", "必要", "方法", "治療成績", "本研究",
];

/// Closed English stop-list for CQ tokenization.
static EN_STOPLIST: &[&str] = &[
    "the", "a", "an", "of", "in", "on", "for", "with", "and", "or", "is",
    "are", "be", "to", "do", "does", "can", "should", "what", "which",
    "patients", "patient", "recommended", "effective", "versus",
];

/// Small curated fallback for therapy terms the synonym table misses.
static JA_EN_LEXICON: &[(&str, &str)] = &[
    ("薬物療法", "pharmacotherapy"),
    ("手術", "surgery"),
    ("放射線治療", "radiotherapy"),
    ("化学療法", "chemotherapy"),
    ("食事療法", "diet therapy"),
    ("認知行動療法", "cognitive behavioral therapy"),
    ("血栓溶解療法", "thrombolysis"),
    ("抗凝固療法", "anticoagulation"),
    ("装具療法", "orthotic treatment"),
    ("温存手術", "conserving surgery"),
    ("補助化学療法", "adjuvant chemotherapy"),
    ("吸入ステロイド", "inhaled corticosteroid"),
];

/// Extract up to 3 (Japanese) or 4 (English) deduplicated terms from a CQ
/// question, in original order. Leading `CQ<n>`/`Q<n>` labels are ignored.
pub fn extract_cq_keywords(question: &str) -> Vec<String> {
    let stripped = PREFIX_RE.replace(question.trim(), "");
    if is_japanese(&stripped) {
        extract_japanese(&stripped)
    } else {
        extract_english(&stripped)
    }
}

fn extract_japanese(text: &str) -> Vec<String> {
    // gather (position, token) from all three token classes, then restore
    // original order
    let mut found: Vec<(usize, String)> = Vec::new();
    for m in KATAKANA_RE.find_iter(text) {
        found.push((m.start(), m.as_str().to_string()));
    }
    for m in KANJI_RE.find_iter(text) {
        let mut token = m.as_str();
        for suffix in ["患者", "症例"] {
            if let Some(rest) = token.strip_suffix(suffix) {
                token = rest;
            }
        }
        if token.chars().count() >= 2 {
            found.push((m.start(), token.to_string()));
        }
    }
    for m in LATIN_RE.find_iter(text) {
        found.push((m.start(), m.as_str().to_string()));
    }
    found.sort_by_key(|(pos, _)| *pos);

    let mut seen = HashSet::new();
    found
        .into_iter()
        .map(|(_, token)| token)
        .filter(|t| !JA_STOPLIST.contains(&t.as_str()))
        .filter(|t| seen.insert(t.to_lowercase()))
        .take(MAX_JA_TERMS)
        .collect()
}

fn extract_english(text: &str) -> Vec<String> {
    let cleaned = ASCII_PUNCT_RE.replace_all(text, " ");
    let mut seen = HashSet::new();
    cleaned
        .split_whitespace()
        .filter(|t| t.len() >= 2)
        .filter(|t| !EN_STOPLIST.contains(&t.to_lowercase().as_str()))
        .filter(|t| seen.insert(t.to_lowercase()))
        .take(MAX_EN_TERMS)
        .map(String::from)
        .collect()
}

/// Promote Japanese terms to English for the PubMed query: synonym class
/// first, curated lexicon second, original term as a last resort.
pub fn promote_english(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|term| {
            if !is_japanese(term) {
                return term.clone();
            }
            if let Some(en) = synonym_index()
                .class_of(term)
                .iter()
                .find(|member| !is_japanese(member))
            {
                return en.clone();
            }
            JA_EN_LEXICON
                .iter()
                .find(|(ja, _)| *ja == term)
                .map(|(_, en)| en.to_string())
                .unwrap_or_else(|| term.clone())
        })
        .collect()
}
