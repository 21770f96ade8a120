//! JSON output formatter.
//!
//! Formats a report as machine-readable JSON for tooling integration.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Counts, Report, ReportFormatter};
use crate::check::Outcome;

/// Formats run results as JSON.
pub struct JsonFormatter {
    generated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    generated_at: DateTime<Utc>,
    outcomes: Vec<&'a Outcome>,
    summary: Counts,
}

impl JsonFormatter {
    /// Create a new JSON formatter stamped with the current time.
    pub fn new() -> Self {
        Self { generated_at: None }
    }

    /// Use a fixed timestamp instead of the current time.
    pub fn at(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: Some(generated_at),
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format<W: Write>(&self, report: &Report, writer: &mut W) -> std::io::Result<()> {
        let output = JsonOutput {
            generated_at: self.generated_at.unwrap_or_else(Utc::now),
            outcomes: report.outcomes().collect(),
            summary: report.counts(),
        };

        serde_json::to_writer_pretty(&mut *writer, &output).map_err(std::io::Error::other)?;
        writeln!(writer)?;

        Ok(())
    }
}
