//! Evisearch Sources - External service adapters
//!
//! One module per bibliographic source, plus the translation and MeSH
//! lookup clients. Every adapter splits fetching (async HTTP against the
//! shared client, per-request deadline) from parsing (pure functions over
//! the response body, tested against fixtures).

pub mod cinii;
pub mod client;
pub mod error;
pub mod europe_pmc;
pub mod generative;
pub mod jstage;
pub mod mesh;
pub mod openalex;
pub mod pubmed;
pub mod semantic_scholar;
pub mod translate;

// Re-exports for convenience
pub use client::{SEARCH_TIMEOUT, TRANSLATE_TIMEOUT, http_client};
pub use error::SourceError;
