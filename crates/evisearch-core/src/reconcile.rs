//! Cross-source deduplication and merge
//!
//! Records from different adapters describing the same article collapse onto
//! one representative under a deterministic identity key. Merging is
//! commutative in everything except `foundIn` order and which source gets
//! the `counts` credit, both of which follow first insertion.

use std::collections::HashMap;

use serde::Serialize;

use crate::record::{EvidenceLevel, Record, Source};
use crate::text::{normalize_doi, normalize_title};

/// Identity key for deduplication: DOI when present, else a normalized
/// title+year pair when the title is substantial, else the adapter-scoped id.
pub fn dedup_key(r: &Record) -> String {
    if let Some(doi) = r.doi.as_deref() {
        let doi = normalize_doi(doi);
        if !doi.is_empty() {
            return format!("doi:{doi}");
        }
    }
    let norm = normalize_title(&r.title);
    if norm.chars().count() > 10 {
        let year = r.year.map_or_else(|| "?".to_string(), |y| y.to_string());
        return format!("t:{norm}:{year}");
    }
    format!("id:{}", r.id)
}

/// Per-source record tallies. A merged record credits only the source of the
/// first record to occupy its key; `foundIn` keeps the full provenance.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SourceCounts {
    pub pubmed: usize,
    pub jstage: usize,
    pub s2: usize,
    pub openalex: usize,
    pub cinii: usize,
    pub epmc: usize,
}

impl SourceCounts {
    fn bump(&mut self, source: Source) {
        match source {
            Source::Pubmed => self.pubmed += 1,
            Source::Jstage => self.jstage += 1,
            Source::S2 => self.s2 += 1,
            Source::Openalex => self.openalex += 1,
            Source::Cinii => self.cinii += 1,
            Source::Epmc => self.epmc += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.pubmed + self.jstage + self.s2 + self.openalex + self.cinii + self.epmc
    }
}

#[derive(Debug, Default)]
pub struct ReconcileOutput {
    /// Deduplicated records in first-seen order.
    pub records: Vec<Record>,
    pub counts: SourceCounts,
}

/// Fold a flattened batch of adapter outputs into deduplicated records.
pub fn reconcile(input: Vec<Record>) -> ReconcileOutput {
    let mut out = ReconcileOutput::default();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in input {
        let key = dedup_key(&record);
        match index.get(&key) {
            Some(&slot) => merge_into(&mut out.records[slot], record),
            None => {
                index.insert(key, out.records.len());
                out.counts.bump(record.source);
                out.records.push(record);
            }
        }
    }
    out
}

fn is_pubmed_url(url: &str) -> bool {
    url.contains("pubmed.ncbi.nlm.nih.gov")
}

/// Merge an incoming duplicate into the existing representative.
fn merge_into(existing: &mut Record, incoming: Record) {
    existing.evidence_level = existing.evidence_level.better(incoming.evidence_level);

    existing.citations = match (existing.citations, incoming.citations) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    };

    if existing.doi.is_none() {
        existing.doi = incoming.doi;
    }
    if existing.journal.is_empty() {
        existing.journal = incoming.journal;
    }
    if existing.year.is_none() {
        existing.year = incoming.year;
    }
    if existing.language.is_none() {
        existing.language = incoming.language;
    }
    if incoming.authors.len() > existing.authors.len() {
        existing.authors = incoming.authors;
    }
    if is_pubmed_url(&incoming.url) && !is_pubmed_url(&existing.url) {
        existing.url = incoming.url;
    }
    for t in incoming.pub_types {
        if !existing.pub_types.contains(&t) {
            existing.pub_types.push(t);
        }
    }
    for s in incoming.found_in {
        if !existing.found_in.contains(&s) {
            existing.found_in.push(s);
        }
    }
}

/// Records bucketed by evidence level in fixed display order; each bucket is
/// sorted by descending year (missing year sorts last).
#[derive(Debug, Default, Serialize)]
pub struct GroupedRecords {
    pub guideline: Vec<Record>,
    pub sr_ma: Vec<Record>,
    pub rct: Vec<Record>,
    pub clinical_trial: Vec<Record>,
    pub observational: Vec<Record>,
    pub case_report: Vec<Record>,
    pub review: Vec<Record>,
    pub other: Vec<Record>,
}

pub fn group_by_level(records: Vec<Record>) -> GroupedRecords {
    let mut grouped = GroupedRecords::default();
    for record in records {
        let bucket = match record.evidence_level {
            EvidenceLevel::Guideline => &mut grouped.guideline,
            EvidenceLevel::SrMa => &mut grouped.sr_ma,
            EvidenceLevel::Rct => &mut grouped.rct,
            EvidenceLevel::ClinicalTrial => &mut grouped.clinical_trial,
            EvidenceLevel::Observational => &mut grouped.observational,
            EvidenceLevel::CaseReport => &mut grouped.case_report,
            EvidenceLevel::Review => &mut grouped.review,
            EvidenceLevel::Other => &mut grouped.other,
        };
        bucket.push(record);
    }
    for bucket in [
        &mut grouped.guideline,
        &mut grouped.sr_ma,
        &mut grouped.rct,
        &mut grouped.clinical_trial,
        &mut grouped.observational,
        &mut grouped.case_report,
        &mut grouped.review,
        &mut grouped.other,
    ] {
        bucket.sort_by_key(|r| std::cmp::Reverse(r.year.unwrap_or(0)));
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: Source, id: &str, title: &str) -> Record {
        Record::new(source, id, title)
    }

    #[test]
    fn dedup_key_prefers_doi() {
        let mut r = record(Source::Pubmed, "1", "A long enough article title");
        r.set_doi("https://doi.org/10.1/ABC");
        assert_eq!(dedup_key(&r), "doi:10.1/abc");
    }

    #[test]
    fn dedup_key_title_year() {
        let mut r = record(Source::Openalex, "W1", "Stroke rehabilitation outcomes");
        r.year = Some(2020);
        assert_eq!(dedup_key(&r), "t:stroke rehabilitation outcomes:2020");
        r.year = None;
        assert_eq!(dedup_key(&r), "t:stroke rehabilitation outcomes:?");
    }

    #[test]
    fn dedup_key_short_title_falls_back_to_id() {
        let r = record(Source::Cinii, "c-9", "Short");
        assert_eq!(dedup_key(&r), "id:c-9");
    }

    #[test]
    fn dedup_key_is_deterministic_across_doi_case() {
        let mut a = record(Source::Pubmed, "1", "Title one long enough");
        a.doi = Some("10.1/x".into());
        let mut b = record(Source::Epmc, "e2", "Different title entirely yes");
        b.doi = Some("10.1/X".into());
        assert_eq!(dedup_key(&a), dedup_key(&b));
    }

    /// Three sources rediscover the same DOI: one survivor holding the best
    /// evidence level, full provenance in first-seen order, count credited
    /// to the first source only.
    #[test]
    fn merge_same_doi_across_three_sources() {
        let mut a = record(Source::Pubmed, "1", "Thrombectomy after stroke");
        a.set_doi("10.1/abc");
        a.evidence_level = EvidenceLevel::Rct;
        let mut b = record(Source::Epmc, "e1", "Thrombectomy after stroke");
        b.set_doi("10.1/abc");
        b.evidence_level = EvidenceLevel::Review;
        let mut c = record(Source::Openalex, "W1", "Thrombectomy after stroke");
        c.set_doi("10.1/abc");
        c.evidence_level = EvidenceLevel::SrMa;

        let out = reconcile(vec![a, b, c]);
        assert_eq!(out.records.len(), 1);
        let merged = &out.records[0];
        assert_eq!(merged.evidence_level, EvidenceLevel::Rct);
        assert_eq!(
            merged.found_in,
            vec![Source::Pubmed, Source::Epmc, Source::Openalex]
        );
        assert!(merged.found_in.contains(&merged.source));
        assert_eq!(out.counts.pubmed, 1);
        assert_eq!(out.counts.epmc, 0);
        assert_eq!(out.counts.openalex, 0);
    }

    #[test]
    fn counts_sum_to_record_total() {
        let mut a = record(Source::Pubmed, "1", "Alpha title long enough here");
        a.set_doi("10.1/a");
        let mut b = record(Source::S2, "s1", "Alpha title long enough here");
        b.set_doi("10.1/a");
        let c = record(Source::Jstage, "j1", "Beta title long enough here");
        let d = record(Source::Cinii, "c1", "Gamma title long enough here");

        let out = reconcile(vec![a, b, c, d]);
        assert_eq!(out.counts.total(), out.records.len());
        assert_eq!(out.records.len(), 3);
    }

    #[test]
    fn merge_fills_absent_fields_only() {
        let mut a = record(Source::S2, "s1", "Gait training in hemiplegia");
        a.set_doi("10.2/g");
        a.citations = Some(10);
        let mut b = record(Source::Pubmed, "2", "Gait training in hemiplegia");
        b.set_doi("10.2/g");
        b.journal = "Stroke".into();
        b.year = Some(2019);
        b.language = Some("eng".into());
        b.citations = Some(4);
        b.url = "https://pubmed.ncbi.nlm.nih.gov/2/".into();
        b.authors = vec!["Sato T".into(), "Suzuki K".into()];

        let out = reconcile(vec![a, b]);
        let merged = &out.records[0];
        assert_eq!(merged.journal, "Stroke");
        assert_eq!(merged.year, Some(2019));
        assert_eq!(merged.language.as_deref(), Some("eng"));
        // max of the two citation counts
        assert_eq!(merged.citations, Some(10));
        // longer author list wins
        assert_eq!(merged.authors.len(), 2);
        // a PubMed URL replaces a non-PubMed one
        assert_eq!(merged.url, "https://pubmed.ncbi.nlm.nih.gov/2/");
    }

    #[test]
    fn merge_does_not_overwrite_present_fields() {
        let mut a = record(Source::Pubmed, "1", "Balance exercises after stroke");
        a.set_doi("10.3/b");
        a.journal = "Phys Ther".into();
        a.year = Some(2021);
        a.url = "https://pubmed.ncbi.nlm.nih.gov/1/".into();
        let mut b = record(Source::Openalex, "W2", "Balance exercises after stroke");
        b.set_doi("10.3/b");
        b.journal = "Other J".into();
        b.year = Some(1999);
        b.url = "https://doi.org/10.3/b".into();

        let out = reconcile(vec![a, b]);
        let merged = &out.records[0];
        assert_eq!(merged.journal, "Phys Ther");
        assert_eq!(merged.year, Some(2021));
        assert_eq!(merged.url, "https://pubmed.ncbi.nlm.nih.gov/1/");
    }

    #[test]
    fn merge_unions_pub_types() {
        let mut a = record(Source::Pubmed, "1", "Statin trial twelve months on");
        a.set_doi("10.4/s");
        a.pub_types = vec!["Journal Article".into()];
        let mut b = record(Source::Epmc, "e1", "Statin trial twelve months on");
        b.set_doi("10.4/s");
        b.pub_types = vec!["Journal Article".into(), "Clinical Trial".into()];

        let out = reconcile(vec![a, b]);
        assert_eq!(
            out.records[0].pub_types,
            vec!["Journal Article".to_string(), "Clinical Trial".to_string()]
        );
    }

    #[test]
    fn grouping_sorts_years_descending() {
        let mut recs = Vec::new();
        for (id, year) in [("a", Some(2018)), ("b", Some(2022)), ("c", None), ("d", Some(2020))] {
            let mut r = record(Source::Pubmed, id, "A sufficiently long title here");
            r.year = year;
            r.evidence_level = EvidenceLevel::Rct;
            r.id = id.to_string();
            recs.push(r);
        }
        let grouped = group_by_level(recs);
        let years: Vec<Option<i32>> = grouped.rct.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![Some(2022), Some(2020), Some(2018), None]);
        assert!(grouped.guideline.is_empty());
    }

    #[test]
    fn grouping_buckets_by_level() {
        let mut a = record(Source::Pubmed, "1", "One");
        a.evidence_level = EvidenceLevel::Guideline;
        let mut b = record(Source::S2, "2", "Two");
        b.evidence_level = EvidenceLevel::Other;
        let grouped = group_by_level(vec![a, b]);
        assert_eq!(grouped.guideline.len(), 1);
        assert_eq!(grouped.other.len(), 1);
    }
}
