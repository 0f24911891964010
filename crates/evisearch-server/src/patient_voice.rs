//! Patient-voice branch
//!
//! A second fan-out that layers qualitative-research filters onto a subset
//! of sources and tags the reconciled results. Failures here degrade to
//! fewer results; they never reach the response's error map.

use evisearch_core::{Record, Source, reconcile};

use crate::search::{PlannedCall, execute_plan};

const QUALITATIVE_FILTER_PUBMED: &str = "qualitative research[pt] OR patient experience[tw] \
     OR lived experience[tw] OR quality of life[tw] OR patient reported outcome[tw] \
     OR patient perspective[tw]";

/// The first four English qualitative terms, quoted, for Europe PMC.
const QUALITATIVE_EN_QUOTED: [&str; 4] = [
    "\"qualitative research\"",
    "\"patient experience\"",
    "\"lived experience\"",
    "\"quality of life\"",
];

/// First Japanese qualitative term, appended to the base query for the
/// Japanese-language sources.
const QUALITATIVE_JA: &str = "質的研究";

const MAX_RESULTS: usize = 30;

/// Qualitative-filtered plan. PubMed and EPMC always run (on the English
/// side of the query when a translation exists); a Japanese query adds
/// J-STAGE and CiNii with the Japanese qualitative term appended.
pub fn build_plan(is_ja: bool, parts: &[String], translated: &[String]) -> Vec<PlannedCall> {
    let en_parts = if is_ja && !translated.is_empty() {
        translated
    } else {
        parts
    };

    let mut plan = vec![
        PlannedCall {
            source: Source::Pubmed,
            query: format!(
                "({}) AND ({QUALITATIVE_FILTER_PUBMED})",
                en_parts.join(" AND ")
            ),
        },
        PlannedCall {
            source: Source::Epmc,
            query: format!(
                "{} AND ({})",
                en_parts.join(" "),
                QUALITATIVE_EN_QUOTED.join(" OR ")
            ),
        },
    ];
    if is_ja {
        let base = parts.join(" ");
        for source in [Source::Jstage, Source::Cinii] {
            plan.push(PlannedCall {
                source,
                query: format!("{base} {QUALITATIVE_JA}"),
            });
        }
    }
    plan
}

pub async fn run(is_ja: bool, parts: &[String], translated: &[String]) -> Vec<Record> {
    let plan = build_plan(is_ja, parts, translated);
    let outcomes = execute_plan(&plan).await;

    let mut flat = Vec::new();
    for (source, result) in outcomes {
        match result {
            Ok(mut batch) => flat.append(&mut batch),
            Err(e) => log::warn!("patient-voice {source} search failed: {e}"),
        }
    }

    let mut records = reconcile(flat).records;
    records.truncate(MAX_RESULTS);
    for record in &mut records {
        record.is_patient_voice = true;
    }
    records
}
