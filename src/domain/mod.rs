//! Domain models and types for Argus.
//!
//! The domain layer provides:
//! - **Findings** ([`RuleMatch`], [`Confidence`], [`MatchType`])
//! - **Sampled data** ([`Table`], [`TableData`], [`TableDataBuilder`])
//! - **Run options** ([`ScanOptions`])
//! - **Error types** ([`ArgusError`]) and the [`Result`] alias
//!
//! All fallible operations return [`Result<T>`], and errors convert with the
//! `?` operator:
//!
//! ```rust
//! use argus::domain::{ArgusError, Result};
//!
//! fn example() -> Result<()> {
//!     let data = std::fs::read("some-file").map_err(ArgusError::from);
//!     let _ = data;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod finding;
pub mod options;
pub mod result;
pub mod table;

// Re-export commonly used types for convenience
pub use errors::ArgusError;
pub use finding::{Confidence, MatchType, RuleMatch};
pub use options::ScanOptions;
pub use result::Result;
pub use table::{Table, TableData, TableDataBuilder};
