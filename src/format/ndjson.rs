//! Newline-delimited JSON formatter

use super::{DisplayMatch, Formatter};
use crate::domain::{ArgusError, Confidence, MatchType, Result};
use serde::Serialize;
use std::io::Write;
use std::sync::Mutex;

#[derive(Serialize)]
struct Entry<'a> {
    name: &'a str,
    match_type: MatchType,
    confidence: Confidence,
    identifier: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    matches: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matches_count: Option<usize>,
}

/// Prints one JSON object per finding
pub struct NdjsonFormatter {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl NdjsonFormatter {
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl Formatter for NdjsonFormatter {
    fn print_matches(&self, matches: &[DisplayMatch]) -> Result<()> {
        let mut out = self
            .writer
            .lock()
            .map_err(|_| ArgusError::Other("output writer poisoned".to_string()))?;

        for m in matches {
            let values = m.values.as_deref().filter(|v| !v.is_empty());
            let entry = Entry {
                name: &m.name,
                match_type: m.match_type,
                confidence: m.confidence,
                identifier: &m.identifier,
                description: &m.description,
                matches: values,
                matches_count: values.map(|v| v.len()),
            };
            let line = serde_json::to_string(&entry)?;
            writeln!(out, "{line}")?;
        }
        out.flush()?;

        Ok(())
    }
}
