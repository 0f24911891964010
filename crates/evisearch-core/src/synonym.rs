//! Synonym index: equivalence classes over medical surface terms
//!
//! Built once at startup from a static table, read-only after publication.

use std::collections::{HashMap, HashSet};

/// Maps a lowercased term to its equivalence class. Classes keep the
/// original casing of their members; membership is case-insensitive.
#[derive(Debug, Default)]
pub struct SynonymIndex {
    classes: Vec<Vec<String>>,
    by_term: HashMap<String, usize>,
}

impl SynonymIndex {
    /// Build from a table of classes. Classes must be disjoint; a term that
    /// reappears in a later class is ignored there (first class wins) and
    /// logged, so a bad table degrades instead of corrupting lookups.
    pub fn new(table: &[&[&str]]) -> Self {
        let mut index = SynonymIndex::default();
        for class in table {
            let class_id = index.classes.len();
            let mut members = Vec::with_capacity(class.len());
            for term in *class {
                let key = term.to_lowercase();
                match index.by_term.get(&key) {
                    Some(existing) if *existing != class_id => {
                        log::warn!("synonym term '{term}' already in another class, skipping");
                        continue;
                    }
                    _ => {
                        index.by_term.insert(key, class_id);
                        members.push(term.to_string());
                    }
                }
            }
            index.classes.push(members);
        }
        index
    }

    /// The class of a term, or the empty slice.
    pub fn class_of(&self, term: &str) -> &[String] {
        self.by_term
            .get(&term.to_lowercase())
            .map(|&i| self.classes[i].as_slice())
            .unwrap_or(&[])
    }

    /// Union of each input term with its class members. Order is first-seen;
    /// duplicates are removed by lowercased identity.
    pub fn expand<'a, I>(&self, terms: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let mut push = |term: &str, out: &mut Vec<String>| {
            if seen.insert(term.to_lowercase()) {
                out.push(term.to_string());
            }
        };
        for term in terms {
            push(term, &mut out);
            for member in self.class_of(term) {
                push(member, &mut out);
            }
        }
        out
    }
}
