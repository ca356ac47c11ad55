//! Output formatting
//!
//! The orchestrator prepares findings for display — filtering low-confidence
//! matches, computing descriptions, and building the truncated sample-value
//! lists — and hands [`DisplayMatch`]es to a [`Formatter`]. Formatters are
//! internally synchronized so one unit's findings print atomically relative
//! to other units.

mod ndjson;
mod text;

pub use ndjson::NdjsonFormatter;
pub use text::TextFormatter;

use crate::domain::{Confidence, MatchType, Result, RuleMatch};
use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Write;
use std::sync::Arc;

static SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is hardcoded and valid"));

/// Output format selected with `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Newline-delimited JSON, one object per finding
    Ndjson,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OutputFormat::Text => "text",
            OutputFormat::Ndjson => "ndjson",
        };
        f.write_str(s)
    }
}

/// Create the formatter for the selected output format
pub fn formatter_for(
    format: OutputFormat,
    writer: Box<dyn Write + Send>,
    color: bool,
) -> Arc<dyn Formatter> {
    match format {
        OutputFormat::Text => Arc::new(TextFormatter::new(writer, color)),
        OutputFormat::Ndjson => Arc::new(NdjsonFormatter::new(writer)),
    }
}

/// Delivers prepared findings to the end user
///
/// Implementations must be safe for concurrent use.
pub trait Formatter: Send + Sync {
    fn print_matches(&self, matches: &[DisplayMatch]) -> Result<()>;
}

/// A finding prepared for rendering
#[derive(Debug, Clone)]
pub struct DisplayMatch {
    pub name: String,
    pub match_type: MatchType,
    pub confidence: Confidence,
    pub identifier: String,
    pub description: String,
    /// Sample values; `Some` exactly when `--show-data` is set
    pub values: Option<Vec<String>>,
}

/// Filter and shape raw findings for the formatter
///
/// Low-confidence findings are dropped unless `show_all`; sample values are
/// built only when `show_data`. The full unfiltered findings still reach the
/// run aggregate for the low-confidence summary.
pub fn prepare_matches(
    matches: &[RuleMatch],
    show_data: bool,
    show_all: bool,
    row_noun: &str,
) -> Vec<DisplayMatch> {
    matches
        .iter()
        .filter(|m| show_all || m.confidence != Confidence::Low)
        .map(|m| {
            let description = match m.match_type {
                MatchType::Name => format!("possible {} (name match)", m.display_name),
                MatchType::Value => {
                    let mut counted = pluralize(m.matched_data.len(), row_noun);
                    if m.confidence == Confidence::Low {
                        counted.push_str(", low confidence");
                    }
                    format!("found {} ({})", m.display_name, counted)
                }
            };
            DisplayMatch {
                name: m.rule_name.clone(),
                match_type: m.match_type,
                confidence: m.confidence,
                identifier: m.identifier.clone(),
                description,
                values: show_data.then(|| display_values(&m.matched_data)),
            }
        })
        .collect()
}

/// Unique, truncate to 50, collapse whitespace runs, and sort
///
/// The transformation is idempotent.
pub fn display_values(matched: &[String]) -> Vec<String> {
    let mut values = unique(matched);
    values.truncate(50);
    for value in &mut values {
        *value = SPACE.replace_all(value, " ").into_owned();
    }
    values.sort();
    values
}

/// First-occurrence-order dedup
fn unique(values: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .iter()
        .filter(|v| seen.insert(v.as_str()))
        .cloned()
        .collect()
}

/// `N noun` with the noun pluralized when N != 1
pub fn pluralize(count: usize, singular: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {}", plural(singular))
    }
}

/// Pluralize a noun: `index` → `indices`, `-ch` → `-ches`, else `-s`
pub fn plural(singular: &str) -> String {
    if singular == "index" {
        "indices".to_string()
    } else if singular.ends_with("ch") {
        format!("{singular}es")
    } else {
        format!("{singular}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_match(confidence: Confidence) -> RuleMatch {
        RuleMatch {
            rule_name: "email".to_string(),
            display_name: "emails".to_string(),
            confidence,
            identifier: "users.email".to_string(),
            matched_data: vec!["test@example.org".to_string()],
            match_type: MatchType::Value,
        }
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "row"), "1 row");
        assert_eq!(pluralize(2, "row"), "2 rows");
        assert_eq!(pluralize(0, "file"), "0 files");
        assert_eq!(pluralize(3, "low confidence match"), "3 low confidence matches");
        assert_eq!(pluralize(2, "index"), "2 indices");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural("table"), "tables");
        assert_eq!(plural("index"), "indices");
        assert_eq!(plural("match"), "matches");
    }

    #[test]
    fn test_display_values_idempotent() {
        let raw = vec![
            "b  b".to_string(),
            "a".to_string(),
            "a".to_string(),
            "c\t c".to_string(),
        ];
        let once = display_values(&raw);
        let twice = display_values(&once);
        assert_eq!(once, vec!["a", "b b", "c c"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_display_values_truncates_to_50() {
        let raw: Vec<String> = (0..80).map(|i| format!("value-{i:03}")).collect();
        let values = display_values(&raw);
        assert_eq!(values.len(), 50);
        let resorted = display_values(&values);
        assert_eq!(values, resorted);
    }

    #[test]
    fn test_prepare_filters_low_confidence() {
        let matches = vec![value_match(Confidence::Low), value_match(Confidence::High)];
        let prepared = prepare_matches(&matches, false, false, "row");
        assert_eq!(prepared.len(), 1);
        assert_eq!(prepared[0].confidence, Confidence::High);

        let all = prepare_matches(&matches, false, true, "row");
        assert_eq!(all.len(), 2);
        assert!(all[0].description.ends_with(", low confidence)"));
    }

    #[test]
    fn test_prepare_descriptions() {
        let value = prepare_matches(&[value_match(Confidence::High)], false, false, "row");
        assert_eq!(value[0].description, "found emails (1 row)");

        let name = RuleMatch {
            rule_name: "postal_code".to_string(),
            display_name: "postal codes".to_string(),
            confidence: Confidence::Medium,
            identifier: "users.zip".to_string(),
            matched_data: vec![],
            match_type: MatchType::Name,
        };
        let prepared = prepare_matches(&[name], false, false, "row");
        assert_eq!(prepared[0].description, "possible postal codes (name match)");
    }

    #[test]
    fn test_prepare_builds_values_only_with_show_data() {
        let without = prepare_matches(&[value_match(Confidence::High)], false, false, "row");
        assert!(without[0].values.is_none());

        let with = prepare_matches(&[value_match(Confidence::High)], true, false, "row");
        assert_eq!(
            with[0].values.as_deref(),
            Some(&["test@example.org".to_string()][..])
        );
    }
}
