//! Evisearch Core - Record model and pure search machinery
//!
//! This crate provides the unified bibliographic record, evidence-level
//! classification, cross-source reconciliation, synonym expansion, and the
//! text/language helpers shared by the source adapters and the server.
//! Everything here is pure computation: no I/O, no shared mutable state.

pub mod evidence;
pub mod lang;
pub mod reconcile;
pub mod record;
pub mod synonym;
pub mod text;

// Re-exports for convenience
pub use evidence::{classify, classify_pub_types, classify_title};
pub use lang::is_japanese;
pub use reconcile::{GroupedRecords, ReconcileOutput, SourceCounts, dedup_key, group_by_level, reconcile};
pub use record::{EvidenceLevel, Record, Source};
pub use synonym::SynonymIndex;
pub use text::{first_year, normalize_doi, normalize_title, strip_html};
