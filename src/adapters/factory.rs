//! URI scheme dispatch
//!
//! The URI prefix selects the adapter; anything unrecognized is handed to the
//! SQL adapter, whose URL parser derives the dialect from the scheme (and
//! rejects schemes no driver claims).

use super::local_file::LocalFileAdapter;
use super::mongodb::MongodbAdapter;
use super::redis::RedisAdapter;
use super::s3::S3Adapter;
use super::search::SearchAdapter;
use super::sql::SqlAdapter;
use super::traits::{DataStoreAdapter, FileAdapter};

/// A dispatched source, ready to be initialized and scanned
pub enum Source {
    DataStore(Box<dyn DataStoreAdapter>),
    Files(Box<dyn FileAdapter>),
}

const SEARCH_PREFIXES: [&str; 4] = [
    "elasticsearch+http://",
    "elasticsearch+https://",
    "opensearch+http://",
    "opensearch+https://",
];

/// Select the adapter for a connection URI
pub fn source_for_url(url: &str) -> Source {
    if url.starts_with("file://") {
        Source::Files(Box::new(LocalFileAdapter::new()))
    } else if url.starts_with("s3://") {
        Source::Files(Box::new(S3Adapter::new()))
    } else if url.starts_with("mongodb://") || url.starts_with("mongodb+srv://") {
        Source::DataStore(Box::new(MongodbAdapter::new()))
    } else if url.starts_with("redis://") || url.starts_with("rediss://") {
        Source::DataStore(Box::new(RedisAdapter::new()))
    } else if SEARCH_PREFIXES.iter().any(|p| url.starts_with(p)) {
        Source::DataStore(Box::new(SearchAdapter::new()))
    } else {
        Source::DataStore(Box::new(SqlAdapter::new()))
    }
}
