//! Per-run scan options

/// Options for a single scan run, built by the CLI front-end
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Connection URI; its scheme selects the adapter
    pub url: String,

    /// Include up to 50 sample values per finding
    pub show_data: bool,

    /// Also print low-confidence findings
    pub show_all: bool,

    /// Rows/documents/keys to sample per table-like unit
    pub sample_size: usize,
}
