//! Findings produced by the detection engine

use serde::Serialize;
use std::fmt;

/// How strongly a finding is believed to be real sensitive data
///
/// Low-confidence findings are suppressed from output unless `--show-all`
/// is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        };
        f.write_str(s)
    }
}

/// Whether a rule matched sampled values or a column name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Value,
    Name,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchType::Value => "value",
            MatchType::Name => "name",
        };
        f.write_str(s)
    }
}

/// A single detection for a specific identifier
#[derive(Debug, Clone)]
pub struct RuleMatch {
    /// Machine-readable rule name, e.g. `email`
    pub rule_name: String,

    /// Human-readable rule description, e.g. `emails`
    pub display_name: String,

    /// Confidence of the finding, set exactly once by the finder
    pub confidence: Confidence,

    /// Location of the finding: `schema.table.column`, a file path, or a key
    pub identifier: String,

    /// Values (or extracted substrings in file mode) that matched
    pub matched_data: Vec<String>,

    /// Value match or name match
    pub match_type: MatchType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_display() {
        assert_eq!(Confidence::Low.to_string(), "low");
        assert_eq!(Confidence::Medium.to_string(), "medium");
        assert_eq!(Confidence::High.to_string(), "high");
    }

    #[test]
    fn test_confidence_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Confidence::High).unwrap(),
            "\"high\""
        );
    }

    #[test]
    fn test_match_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MatchType::Name).unwrap(), "\"name\"");
        assert_eq!(
            serde_json::to_string(&MatchType::Value).unwrap(),
            "\"value\""
        );
    }
}
