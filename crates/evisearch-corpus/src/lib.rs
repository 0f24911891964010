//! Evisearch Corpus - Embedded guideline and clinical-question registries
//!
//! The national-guideline (GL) and clinical-question (CQ) registries are
//! read-only static data; the synonym index is built from its table once and
//! published. Scoring, keyword extraction, and autocomplete are pure
//! functions over these.

pub mod data;
pub mod keywords;
pub mod model;
pub mod score;
pub mod suggest;
pub mod synonyms;

// Re-exports for convenience
pub use data::{CQS, GUIDELINES, guideline_by_id};
pub use keywords::{extract_cq_keywords, promote_english};
pub use model::{ClinicalQuestion, Guideline};
pub use score::{CqMatch, GuidelineMatch, score_cqs, score_guidelines};
pub use suggest::suggest;
pub use synonyms::synonym_index;
