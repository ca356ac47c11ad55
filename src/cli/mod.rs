//! CLI interface and argument parsing
//!
//! Single command, single required positional argument: the connection URI.

use crate::format::OutputFormat;
use clap::Parser;

/// Scan your data stores for unencrypted personal data (PII)
#[derive(Parser, Debug)]
#[command(name = "argus")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Connection URI for the data store to scan
    #[arg(value_name = "connection-uri")]
    pub url: Option<String>,

    /// Show up to 50 sample values for each finding
    #[arg(long)]
    pub show_data: bool,

    /// Also show low confidence matches
    #[arg(long)]
    pub show_all: bool,

    /// Rows/documents/keys to sample from each table-like unit
    #[arg(long, default_value_t = 10_000, value_parser = clap::value_parser!(u64).range(1..))]
    pub sample_size: u64,

    /// Maximum worker threads for CPU-bound scanning
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub processes: u64,

    /// Only run these rules (comma-separated)
    #[arg(long, default_value = "")]
    pub only: String,

    /// Skip these rules (comma-separated)
    #[arg(long, default_value = "")]
    pub except: String,

    /// Minimum matched values required to report a finding
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub min_count: u64,

    /// Scan for a custom regular expression instead of the built-in rules
    #[arg(long, default_value = "")]
    pub pattern: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "ARGUS_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["argus", "postgres://localhost/app"]);
        assert_eq!(cli.url.as_deref(), Some("postgres://localhost/app"));
        assert!(!cli.show_data);
        assert!(!cli.show_all);
        assert_eq!(cli.sample_size, 10_000);
        assert_eq!(cli.processes, 1);
        assert_eq!(cli.min_count, 1);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_parse_without_uri() {
        let cli = Cli::parse_from(["argus"]);
        assert!(cli.url.is_none());
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "argus",
            "file:///data",
            "--show-data",
            "--show-all",
            "--sample-size",
            "250",
            "--only",
            "email,phone",
            "--min-count",
            "2",
            "--format",
            "ndjson",
        ]);
        assert!(cli.show_data);
        assert!(cli.show_all);
        assert_eq!(cli.sample_size, 250);
        assert_eq!(cli.only, "email,phone");
        assert_eq!(cli.min_count, 2);
        assert_eq!(cli.format, OutputFormat::Ndjson);
    }

    #[test]
    fn test_sample_size_must_be_positive() {
        let result = Cli::try_parse_from(["argus", "file:///data", "--sample-size", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = Cli::try_parse_from(["argus", "file:///data", "--format", "yaml"]);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("text"));
        assert!(message.contains("ndjson"));
    }

    #[test]
    fn test_pattern_flag() {
        let cli = Cli::parse_from(["argus", "file:///data", "--pattern", r"\d{4}"]);
        assert_eq!(cli.pattern, r"\d{4}");
    }
}
