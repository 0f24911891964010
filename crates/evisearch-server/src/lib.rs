//! Evisearch Server - HTTP surface and search orchestration
//!
//! The orchestrator parses a clinical query, expands synonyms, plans which
//! sources receive which language variant, fans the plan out concurrently
//! with per-task isolation, reconciles the results, and assembles the
//! response envelope together with local guideline/CQ matches.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod patient_voice;
pub mod rate_limit;
pub mod routes;
pub mod search;
pub mod state;

pub use config::Config;
pub use state::AppState;
