//! Concurrent scan orchestration
//!
//! Both orchestrators share the same shape: enumerate units, fan each unit
//! out as a task, print its findings through the shared formatter as soon as
//! it completes, and aggregate everything for the run summary. The first
//! task error aborts the run; findings already printed stay printed.
//!
//! Data-store tasks serialize their sampling queries on a shared mutex —
//! backend clients often multiplex poorly and sampling queries are
//! expensive — while CPU-bound scanning still overlaps with the next
//! table's fetch. File tasks are independent and only bounded by a
//! concurrency cap.

use crate::adapters::{DataStoreAdapter, FileAdapter};
use crate::detector::{MatchConfig, MatchFinder};
use crate::domain::{ArgusError, Result, RuleMatch, ScanOptions};
use crate::format::{plural, pluralize, prepare_matches, Formatter};
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;

const MAX_CONCURRENT_FILES: usize = 20;

/// Scan every table-like unit of a data store
///
/// Returns `None` when the store has nothing to scan (the empty-store
/// message has already been printed).
pub(crate) async fn scan_data_store(
    adapter: Arc<dyn DataStoreAdapter>,
    options: &ScanOptions,
    config: Arc<MatchConfig>,
    formatter: Arc<dyn Formatter>,
) -> Result<Option<Vec<RuleMatch>>> {
    let tables = adapter.fetch_tables().await?;
    if tables.is_empty() {
        eprintln!("Found no {} to scan", plural(adapter.table_name()));
        return Ok(None);
    }

    eprintln!(
        "Found {} to scan, sampling {} from each...\n",
        pluralize(tables.len(), adapter.table_name()),
        pluralize(options.sample_size, adapter.row_name()),
    );

    let query_lock = Arc::new(Mutex::new(()));
    let mut tasks = JoinSet::new();
    for table in tables {
        let adapter = Arc::clone(&adapter);
        let config = Arc::clone(&config);
        let formatter = Arc::clone(&formatter);
        let query_lock = Arc::clone(&query_lock);
        let options = options.clone();

        tasks.spawn(async move {
            let data = {
                let _guard = query_lock.lock().await;
                adapter.fetch_table_data(&table, options.sample_size).await?
            };

            let mut finder = MatchFinder::new(config);
            let matches = finder.check_table_data(&table, &data);

            let display = prepare_matches(
                &matches,
                options.show_data,
                options.show_all,
                adapter.row_name(),
            );
            formatter.print_matches(&display)?;
            Ok(matches)
        });
    }

    collect(tasks).await.map(Some)
}

/// Scan every file of a file source
pub(crate) async fn scan_files(
    adapter: Arc<dyn FileAdapter>,
    options: &ScanOptions,
    config: Arc<MatchConfig>,
    formatter: Arc<dyn Formatter>,
) -> Result<Option<Vec<RuleMatch>>> {
    let files = adapter.fetch_files().await?;
    if files.is_empty() {
        eprintln!("Found no {} to scan", plural(adapter.object_name()));
        return Ok(None);
    }

    eprintln!(
        "Found {} to scan...\n",
        pluralize(files.len(), adapter.object_name())
    );

    let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_FILES));
    let mut tasks = JoinSet::new();
    for file in files {
        let adapter = Arc::clone(&adapter);
        let config = Arc::clone(&config);
        let formatter = Arc::clone(&formatter);
        let semaphore = Arc::clone(&semaphore);
        let show_data = options.show_data;
        let show_all = options.show_all;

        tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| ArgusError::Other(format!("Scan pool closed: {e}")))?;

            let mut finder = MatchFinder::new(config);
            adapter.find_file_matches(&file, &mut finder).await?;
            let matches = finder.check_matches(&file, true);

            let display = prepare_matches(&matches, show_data, show_all, "line");
            formatter.print_matches(&display)?;
            Ok(matches)
        });
    }

    collect(tasks).await.map(Some)
}

/// Drain the task set, returning the first error
///
/// Dropping the set on error cancels every task still waiting.
async fn collect(mut tasks: JoinSet<Result<Vec<RuleMatch>>>) -> Result<Vec<RuleMatch>> {
    let mut all = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let matches =
            joined.map_err(|e| ArgusError::Other(format!("Scan task failed: {e}")))??;
        all.extend(matches);
    }
    Ok(all)
}
