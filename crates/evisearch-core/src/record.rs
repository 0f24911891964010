//! Unified bibliographic record shared by all source adapters

use serde::Serialize;

use crate::text::normalize_doi;

/// External bibliographic source.
///
/// The label doubles as the wire name in `sources.counts`, `sources.errors`,
/// and `foundIn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Pubmed,
    Jstage,
    S2,
    Openalex,
    Cinii,
    Epmc,
}

impl Source {
    pub const ALL: [Source; 6] = [
        Source::Pubmed,
        Source::Jstage,
        Source::S2,
        Source::Openalex,
        Source::Cinii,
        Source::Epmc,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Source::Pubmed => "pubmed",
            Source::Jstage => "jstage",
            Source::S2 => "s2",
            Source::Openalex => "openalex",
            Source::Cinii => "cinii",
            Source::Epmc => "epmc",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse study-design ranking. Rank 0 is the strongest synthesis.
///
/// The rank order is load-bearing: the reconciler keeps the minimum rank
/// across merged records, and the response groups buckets in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceLevel {
    Guideline,
    SrMa,
    Rct,
    ClinicalTrial,
    Observational,
    CaseReport,
    Review,
    Other,
}

impl EvidenceLevel {
    /// All levels in display order (best rank first).
    pub const ALL: [EvidenceLevel; 8] = [
        EvidenceLevel::Guideline,
        EvidenceLevel::SrMa,
        EvidenceLevel::Rct,
        EvidenceLevel::ClinicalTrial,
        EvidenceLevel::Observational,
        EvidenceLevel::CaseReport,
        EvidenceLevel::Review,
        EvidenceLevel::Other,
    ];

    pub fn rank(self) -> u8 {
        match self {
            EvidenceLevel::Guideline => 0,
            EvidenceLevel::SrMa => 1,
            EvidenceLevel::Rct => 2,
            EvidenceLevel::ClinicalTrial => 3,
            EvidenceLevel::Observational => 4,
            EvidenceLevel::CaseReport => 5,
            EvidenceLevel::Review => 6,
            EvidenceLevel::Other => 7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EvidenceLevel::Guideline => "guideline",
            EvidenceLevel::SrMa => "sr_ma",
            EvidenceLevel::Rct => "rct",
            EvidenceLevel::ClinicalTrial => "clinical_trial",
            EvidenceLevel::Observational => "observational",
            EvidenceLevel::CaseReport => "case_report",
            EvidenceLevel::Review => "review",
            EvidenceLevel::Other => "other",
        }
    }

    /// The better (lower-ranked) of two levels.
    pub fn better(self, other: EvidenceLevel) -> EvidenceLevel {
        if other.rank() < self.rank() { other } else { self }
    }
}

/// The unified bibliographic item every adapter produces.
///
/// Optional fields use `None` for "the source did not report this" so the
/// reconciler's fill-if-absent rule is unambiguous.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Adapter-scoped unique identifier.
    pub id: String,
    /// Title with HTML stripped.
    pub title: String,
    /// Up to 5 author display names, source order.
    pub authors: Vec<String>,
    pub journal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Raw publication-type tokens as reported by the source.
    pub pub_types: Vec<String>,
    pub evidence_level: EvidenceLevel,
    /// Lowercased, `doi.org` prefix stripped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    /// Canonical link: PubMed when a PMID is known, else DOI, else native.
    pub url: String,
    pub source: Source,
    /// Every source that produced a record merged into this one, in
    /// first-seen order. Always contains `source`.
    pub found_in: Vec<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citations: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_patient_voice: bool,
}

impl Record {
    /// New record with `found_in = [source]` and everything else absent.
    pub fn new(source: Source, id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            authors: Vec::new(),
            journal: String::new(),
            year: None,
            pub_types: Vec::new(),
            evidence_level: EvidenceLevel::Other,
            doi: None,
            url: String::new(),
            source,
            found_in: vec![source],
            citations: None,
            language: None,
            is_patient_voice: false,
        }
    }

    /// Store a DOI, normalizing case and stripping any `doi.org` URL prefix.
    /// Empty input leaves the field absent.
    pub fn set_doi(&mut self, raw: &str) {
        let doi = normalize_doi(raw);
        if !doi.is_empty() {
            self.doi = Some(doi);
        }
    }
}
