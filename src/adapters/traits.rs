//! Adapter abstraction traits
//!
//! Every source is one of two shapes: a data store that can enumerate
//! table-like units and sample them into columns of string values, or a file
//! source that can enumerate files and stream their content through the
//! match finder. The nouns (`table`/`row`, `collection`/`document`, ...) are
//! only used in user-facing messages.

use crate::detector::MatchFinder;
use crate::domain::{Result, Table, TableData};
use async_trait::async_trait;

/// A source with enumerable, sampleable table-like units
#[async_trait]
pub trait DataStoreAdapter: Send + Sync {
    /// Singular noun for a unit, e.g. `"table"` or `"collection"`
    fn table_name(&self) -> &'static str;

    /// Singular noun for a sampled record, e.g. `"row"` or `"document"`
    fn row_name(&self) -> &'static str;

    /// Connect and validate the backend
    ///
    /// # Errors
    ///
    /// Returns an error if the URI is invalid or the backend is unreachable.
    async fn init(&mut self, url: &str) -> Result<()>;

    /// Enumerate the units to scan
    async fn fetch_tables(&self) -> Result<Vec<Table>>;

    /// Sample up to `limit` records from one unit
    ///
    /// Backends are queried under the orchestrator's query mutex, so
    /// implementations never see concurrent calls.
    async fn fetch_table_data(&self, table: &Table, limit: usize) -> Result<TableData>;
}

/// A source with enumerable files
#[async_trait]
pub trait FileAdapter: Send + Sync {
    /// Singular noun for a unit, e.g. `"file"` or `"object"`
    fn object_name(&self) -> &'static str;

    /// Validate the URI and prepare any client state
    async fn init(&mut self, url: &str) -> Result<()>;

    /// Enumerate the files to scan
    async fn fetch_files(&self) -> Result<Vec<String>>;

    /// Feed one file's content through the match finder
    async fn find_file_matches(&self, path: &str, finder: &mut MatchFinder) -> Result<()>;
}
