// Argus - PII Data Store Scanner
// Copyright (c) 2025 Argus Contributors
// Licensed under the MIT License

//! # Argus - PII Data Store Scanner
//!
//! Argus scans heterogeneous data stores for unencrypted personal data (PII)
//! by sampling content and matching it against a library of detection rules.
//! A single connection URI selects the source: local files, object storage,
//! relational databases, document stores, key-value stores, or search
//! indices.
//!
//! ## Architecture
//!
//! Argus follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`detector`] - Rules, match configuration, and finding synthesis
//! - [`scanner`] - Scan orchestration and the file processor
//! - [`adapters`] - Source integrations behind a uniform contract
//! - [`format`] - Text and NDJSON output
//! - [`domain`] - Core domain types and errors
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use argus::detector::MatchConfig;
//! use argus::domain::ScanOptions;
//! use argus::format::{formatter_for, OutputFormat};
//!
//! #[tokio::main]
//! async fn main() -> argus::domain::Result<()> {
//!     let options = ScanOptions {
//!         url: "postgres://localhost/app".to_string(),
//!         show_data: false,
//!         show_all: false,
//!         sample_size: 10_000,
//!     };
//!     let config = MatchConfig::default();
//!     let formatter = formatter_for(OutputFormat::Text, Box::new(std::io::stdout()), false);
//!
//!     let findings = argus::scanner::scan(options, config, formatter).await?;
//!     eprintln!("{} findings", findings.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Detection model
//!
//! Detection is sampling-based and best-effort: each table-like unit is
//! sampled up to `sample_size` records, files are read in full, and every
//! finding carries a confidence (`low`, `medium`, `high`) derived from how
//! much of the sample matched. Low-confidence findings are suppressed from
//! output by default.

pub mod adapters;
pub mod cli;
pub mod detector;
pub mod domain;
pub mod format;
pub mod logging;
pub mod scanner;
