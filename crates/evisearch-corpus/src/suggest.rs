//! Autocomplete over CQ keywords and guideline disease names

use std::collections::HashSet;

use crate::data::{CQS, GUIDELINES};

const MAX_SUGGESTIONS: usize = 15;

/// Up to 15 candidate completions: prefix matches first, then remaining
/// substring matches, each group ordered by ascending length.
pub fn suggest(query: &str) -> Vec<String> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut candidates: Vec<&str> = Vec::new();
    for cq in CQS {
        for kw in cq.kw {
            if seen.insert(kw.to_lowercase()) {
                candidates.push(kw);
            }
        }
    }
    for gl in GUIDELINES {
        for disease in gl.diseases {
            if seen.insert(disease.to_lowercase()) {
                candidates.push(disease);
            }
        }
    }

    let mut matches: Vec<&str> = candidates
        .into_iter()
        .filter(|c| c.to_lowercase().contains(&q))
        .collect();
    matches.sort_by_key(|c| (!c.to_lowercase().starts_with(&q), c.chars().count()));
    matches
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matches_come_first() {
        let out = suggest("心不全");
        assert!(!out.is_empty());
        // every prefix match precedes every mere-containment match
        let first_containment = out
            .iter()
            .position(|s| !s.to_lowercase().starts_with("心不全"));
        if let Some(pos) = first_containment {
            assert!(out[pos..]
                .iter()
                .all(|s| !s.to_lowercase().starts_with("心不全")));
        }
    }

    #[test]
    fn shorter_suggestions_first_within_group() {
        let out = suggest("リハビリ");
        let prefix_lens: Vec<usize> = out
            .iter()
            .filter(|s| s.starts_with("リハビリ"))
            .map(|s| s.chars().count())
            .collect();
        let mut sorted = prefix_lens.clone();
        sorted.sort_unstable();
        assert_eq!(prefix_lens, sorted);
    }

    #[test]
    fn case_insensitive_matching() {
        let upper = suggest("COPD");
        let lower = suggest("copd");
        assert_eq!(upper, lower);
        assert!(!upper.is_empty());
    }

    #[test]
    fn caps_at_fifteen() {
        // 療 appears across many registry keywords
        assert!(suggest("療").len() <= 15);
    }

    #[test]
    fn empty_query_is_empty() {
        assert!(suggest("").is_empty());
        assert!(suggest("  ").is_empty());
    }
}
