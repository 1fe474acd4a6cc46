//! Deterministic scoring and matching — the local fallback path used when
//! the AI evaluator is unavailable. Pure functions of the profile.

pub mod analysis;
pub mod keyword_match;

pub use analysis::score_profile;
pub use keyword_match::match_job;
