//! Outcome collection and presentation.
//!
//! A [`Report`] is the ordered sink the runner records outcomes into.
//! Formatters render a finished report for humans ([`HumanFormatter`]) or
//! tooling ([`JsonFormatter`]).

pub mod human;
pub mod json;

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::check::{Outcome, Severity};

pub use human::HumanFormatter;
pub use json::JsonFormatter;

/// Output format for run results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Trait for formatting a finished report.
pub trait ReportFormatter {
    /// Format the report to the given writer.
    fn format<W: Write>(&self, report: &Report, writer: &mut W) -> std::io::Result<()>;
}

/// Ordered record of every outcome produced by a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    outcomes: Vec<Outcome>,
}

/// Outcome counts by result and severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub recommendations: usize,
    pub informational: usize,
}

impl Report {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an outcome.
    pub fn record(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    /// Recorded outcomes in order. Each call starts from the beginning.
    pub fn outcomes(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter()
    }

    /// Outcomes whose condition did not hold, in order.
    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }

    /// Whether any outcome failed at the given severity.
    pub fn has_failures(&self, severity: Severity) -> bool {
        self.outcomes.iter().any(|o| o.is_failure(severity))
    }

    /// Whether the environment is healthy enough to pass a run.
    ///
    /// Failed errors always count against it; failed recommendations only
    /// in strict mode. Informational outcomes never do.
    pub fn is_healthy(&self, strict: bool) -> bool {
        !self.has_failures(Severity::Error)
            && !(strict && self.has_failures(Severity::Recommendation))
    }

    /// Count outcomes by result and severity.
    pub fn counts(&self) -> Counts {
        let mut summary = Counts {
            total: self.outcomes.len(),
            ..Counts::default()
        };
        for outcome in &self.outcomes {
            if outcome.passed {
                summary.passed += 1;
                continue;
            }
            summary.failed += 1;
            match outcome.severity {
                Severity::Error => summary.errors += 1,
                Severity::Recommendation => summary.recommendations += 1,
                Severity::Informational => summary.informational += 1,
            }
        }
        summary
    }

    /// Number of recorded outcomes.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl FromIterator<Outcome> for Report {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::CheckId;

    fn outcome(id: &str, passed: bool, severity: Severity) -> Outcome {
        Outcome::new(CheckId::new(id), passed, severity, format!("{} message", id))
    }

    #[test]
    fn record_preserves_order() {
        let mut report = Report::new();
        report.record(outcome("b", true, Severity::Error));
        report.record(outcome("a", false, Severity::Recommendation));

        let ids: Vec<&str> = report.outcomes().map(|o| o.check_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        // Restartable
        assert_eq!(report.outcomes().count(), 2);
    }

    #[test]
    fn no_deduplication() {
        let mut report = Report::new();
        report.record(outcome("a", true, Severity::Error));
        report.record(outcome("a", true, Severity::Error));
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn counts_failures_by_severity() {
        let report: Report = vec![
            outcome("a", true, Severity::Error),
            outcome("b", false, Severity::Error),
            outcome("c", false, Severity::Recommendation),
            outcome("d", false, Severity::Recommendation),
            outcome("e", false, Severity::Informational),
        ]
        .into_iter()
        .collect();

        let summary = report.counts();
        assert_eq!(summary.total, 5);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 4);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.recommendations, 2);
        assert_eq!(summary.informational, 1);
    }

    #[test]
    fn health_depends_on_strictness() {
        let report: Report = vec![outcome("a", false, Severity::Recommendation)]
            .into_iter()
            .collect();
        assert!(report.is_healthy(false));
        assert!(!report.is_healthy(true));

        let report: Report = vec![outcome("a", false, Severity::Error)].into_iter().collect();
        assert!(!report.is_healthy(false));
    }

    #[test]
    fn informational_failures_never_fail_a_run() {
        let report: Report = vec![outcome("mod-security", false, Severity::Informational)]
            .into_iter()
            .collect();
        assert!(report.is_healthy(true));
    }

    #[test]
    fn empty_report_is_healthy() {
        let report = Report::new();
        assert!(report.is_empty());
        assert!(report.is_healthy(true));
    }
}
