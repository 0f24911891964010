//! Evidence-level classification
//!
//! Two classifiers feed the record normalizer: one over the raw
//! publication-type tokens a source reports, one over the title text.
//! The title cascade is an ordered table compiled once; the order is a
//! contract (first match wins), so tests pin it.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::EvidenceLevel;

/// Classify from raw publication-type tokens, fixed priority.
pub fn classify_pub_types(pub_types: &[String]) -> EvidenceLevel {
    let lowered: Vec<String> = pub_types.iter().map(|t| t.to_lowercase()).collect();
    let has = |needle: &str| lowered.iter().any(|t| t.contains(needle));
    let is = |needle: &str| lowered.iter().any(|t| t == needle);

    if has("practice guideline") || is("guideline") {
        EvidenceLevel::Guideline
    } else if has("systematic review") {
        EvidenceLevel::SrMa
    } else if has("meta-analysis") {
        EvidenceLevel::SrMa
    } else if has("randomized controlled trial") {
        EvidenceLevel::Rct
    } else if has("clinical trial") {
        EvidenceLevel::ClinicalTrial
    } else if has("observational") || has("cohort") || has("case-control") {
        EvidenceLevel::Observational
    } else if has("case report") {
        EvidenceLevel::CaseReport
    } else if is("review") {
        EvidenceLevel::Review
    } else {
        EvidenceLevel::Other
    }
}

/// The ordered title cascade. English alternates match case-insensitively;
/// Japanese alternates match raw. Tiers 8-10 and 12 recover study type from
/// idiomatic Japanese phrasing that never carries an explicit design label.
/// The efficacy/effectiveness tier sits late on purpose: that vocabulary
/// appears across all study designs.
static TITLE_RULES: LazyLock<Vec<(Regex, EvidenceLevel)>> = LazyLock::new(|| {
    let rule = |pattern: &str, level| {
        (Regex::new(pattern).expect("title rule regex"), level)
    };
    vec![
        rule(
            r"(?i)guideline|practice parameter|consensus statement|clinical recommendation|ガイドライン|推奨グレード",
            EvidenceLevel::Guideline,
        ),
        rule(
            r"(?i)systematic|meta[\s-]?analysis|umbrella review|scoping review|システマティック|メタアナリシス|メタ分析",
            EvidenceLevel::SrMa,
        ),
        rule(
            r"(?i)randomiz|rct\b|controlled trial|ランダム化|無作為化?比較",
            EvidenceLevel::Rct,
        ),
        rule(
            r"(?i)clinical trial|intervention study|pilot study|feasibility|臨床試験|介入研究|パイロット",
            EvidenceLevel::ClinicalTrial,
        ),
        rule(
            r"(?i)cohort|cross[\s-]?sectional|case[\s-]?control|registry|retrospectiv|prospectiv|epidemiolog|prevalence|incidence|survey|longitudinal|コホート|観察研究|横断研究|前向き|後ろ向き|追跡調査|縦断|症例対照|レジストリ|有病率|発生率|アンケート|質問紙",
            EvidenceLevel::Observational,
        ),
        rule(
            r"(?i)case report|case series|症例報告|症例検討|一例|1例|一症例|経験例",
            EvidenceLevel::CaseReport,
        ),
        rule(
            r"(?i)review|overview|narrative|レビュー|総説|文献的考察|文献検討",
            EvidenceLevel::Review,
        ),
        rule(
            r"についての検討|に関する検討|の検討|因子の検討|要因.{0,4}検討|発生要因|に関する研究|に関する調査|の実態調査|解析|分析した|を分析|多変量|回帰|統計",
            EvidenceLevel::Observational,
        ),
        rule(
            r"の現状と課題|現状と展望|の動向|の概要|の概説|の紹介|最新の|特集|考え方と実際|の実際",
            EvidenceLevel::Review,
        ),
        rule(
            r"の報告|について報告|を報告|を経験",
            EvidenceLevel::CaseReport,
        ),
        rule(
            r"(?i)efficacy|effectiveness|comparison|outcome|効果|有効性|比較検討|治療成績",
            EvidenceLevel::ClinicalTrial,
        ),
        rule(r"影響|予後|関連|関与|相関|関係", EvidenceLevel::Observational),
    ]
});

/// Classify a title through the cascade; total, falls through to `Other`.
pub fn classify_title(title: &str) -> EvidenceLevel {
    for (re, level) in TITLE_RULES.iter() {
        if re.is_match(title) {
            return *level;
        }
    }
    EvidenceLevel::Other
}

/// Layered classification: publication-type metadata first, title second.
pub fn classify(pub_types: &[String], title: &str) -> EvidenceLevel {
    let by_type = classify_pub_types(pub_types);
    if by_type != EvidenceLevel::Other {
        by_type
    } else {
        classify_title(title)
    }
}
