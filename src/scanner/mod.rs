//! Scan entry point and pipeline
//!
//! [`scan`] dispatches the URI to an adapter, runs the matching
//! orchestrator, and prints the run summary. Findings stream to the
//! formatter as units complete; the returned list is the full aggregate,
//! including low-confidence findings the formatter suppressed.

pub mod files;
pub mod orchestrator;

use crate::adapters::{self, Source};
use crate::detector::MatchConfig;
use crate::domain::{Confidence, Result, RuleMatch, ScanOptions};
use crate::format::{pluralize, Formatter};
use std::sync::Arc;

/// Run one scan
pub async fn scan(
    options: ScanOptions,
    match_config: MatchConfig,
    formatter: Arc<dyn Formatter>,
) -> Result<Vec<RuleMatch>> {
    let config = Arc::new(match_config);

    let matches = match adapters::source_for_url(&options.url) {
        Source::DataStore(mut adapter) => {
            adapter.init(&options.url).await?;
            let adapter: Arc<dyn adapters::DataStoreAdapter> = Arc::from(adapter);
            orchestrator::scan_data_store(adapter, &options, config, formatter).await?
        }
        Source::Files(mut adapter) => {
            adapter.init(&options.url).await?;
            let adapter: Arc<dyn adapters::FileAdapter> = Arc::from(adapter);
            orchestrator::scan_files(adapter, &options, config, formatter).await?
        }
    };

    // nothing to scan; the orchestrator already said so
    let Some(matches) = matches else {
        return Ok(Vec::new());
    };

    if matches.is_empty() {
        eprintln!("No sensitive data found");
        return Ok(matches);
    }

    if options.show_data {
        eprintln!("Showing 50 unique values from each");
    } else {
        eprintln!("\nUse --show-data to view data");
    }

    if !options.show_all {
        let suppressed = matches
            .iter()
            .filter(|m| m.confidence == Confidence::Low)
            .count();
        if suppressed > 0 {
            eprintln!(
                "Also found {}. Use --show-all to view them",
                pluralize(suppressed, "low confidence match")
            );
        }
    }

    Ok(matches)
}
