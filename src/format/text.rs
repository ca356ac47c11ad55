//! Human-readable text formatter

use super::{DisplayMatch, Formatter};
use crate::domain::{ArgusError, Result};
use std::io::Write;
use std::sync::Mutex;

const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Prints findings as `identifier: description` lines
///
/// The identifier is colored yellow when the output is a terminal. With
/// `--show-data`, an indented line of sample values follows each finding.
pub struct TextFormatter {
    writer: Mutex<Box<dyn Write + Send>>,
    color: bool,
}

impl TextFormatter {
    pub fn new(writer: Box<dyn Write + Send>, color: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            color,
        }
    }
}

impl Formatter for TextFormatter {
    fn print_matches(&self, matches: &[DisplayMatch]) -> Result<()> {
        let mut out = self
            .writer
            .lock()
            .map_err(|_| ArgusError::Other("output writer poisoned".to_string()))?;

        for m in matches {
            if self.color {
                writeln!(out, "{YELLOW}{}:{RESET} {}", m.identifier, m.description)?;
            } else {
                writeln!(out, "{}: {}", m.identifier, m.description)?;
            }

            if let Some(values) = &m.values {
                if !values.is_empty() {
                    writeln!(out, "    {}", values.join(", "))?;
                }
                writeln!(out)?;
            }
        }
        out.flush()?;

        Ok(())
    }
}
