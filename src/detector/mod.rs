//! PII detection engine
//!
//! The detector is the core of Argus: a library of detection rules
//! ([`rules`]), the per-run configuration assembled from CLI flags
//! ([`MatchConfig`]), and the accumulator that applies rules to sampled
//! content and synthesizes findings with calibrated confidence
//! ([`MatchFinder`]).
//!
//! Detection is best-effort by design: it samples rather than scans
//! exhaustively, and confidence scoring is what separates real findings
//! from noise (an `id` column full of integers matches nothing; a column
//! that is half email addresses is reported with high confidence).

pub mod config;
pub mod finder;
pub mod rules;

pub use config::MatchConfig;
pub use finder::MatchFinder;
