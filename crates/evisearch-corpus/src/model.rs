//! Registry entry types

use serde::Serialize;

/// A national clinical practice guideline.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Guideline {
    pub id: &'static str,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_en: Option<&'static str>,
    pub org: &'static str,
    pub url: &'static str,
    /// Category slug used by the CQ browse filter.
    pub cat: &'static str,
    pub country: &'static str,
    pub year: i32,
    /// Disease surface terms in both scripts; the scorer matches against
    /// these.
    pub diseases: &'static [&'static str],
}

/// A clinical question extracted from a guideline.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalQuestion {
    /// Parent guideline id.
    pub gid: &'static str,
    /// Display label, e.g. "CQ3".
    pub cq: &'static str,
    /// The question text.
    pub q: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Recommendation statement.
    pub rec: &'static str,
    /// Pre-assigned evidence grade as printed in the guideline.
    pub ev: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Keyword terms; both languages may appear.
    pub kw: &'static [&'static str],
}
