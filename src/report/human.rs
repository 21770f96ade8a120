//! Human-readable output formatter.
//!
//! Formats a report for terminal display with optional color support.

use std::io::Write;

use super::{Report, ReportFormatter};
use crate::check::{Outcome, Severity};
use crate::ui::theme::HealthTheme;

/// Formats run results for human consumption.
pub struct HumanFormatter {
    theme: HealthTheme,
    /// Also list passing outcomes.
    pub verbose: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool, verbose: bool) -> Self {
        let theme = if use_color {
            HealthTheme::new()
        } else {
            HealthTheme::plain()
        };
        Self { theme, verbose }
    }

    fn prefix(&self, outcome: &Outcome) -> String {
        let (style, label) = if outcome.passed {
            (&self.theme.success, "ok".to_string())
        } else {
            let style = match outcome.severity {
                Severity::Error => &self.theme.error,
                Severity::Recommendation => &self.theme.warning,
                Severity::Informational => &self.theme.info,
            };
            (style, outcome.severity.to_string())
        };
        let prefix = format!("{}[{}]", label, outcome.check_id);
        style.apply_to(prefix).to_string()
    }
}

impl ReportFormatter for HumanFormatter {
    fn format<W: Write>(&self, report: &Report, writer: &mut W) -> std::io::Result<()> {
        for outcome in report.outcomes() {
            if outcome.passed {
                if self.verbose {
                    writeln!(writer, "{}", self.prefix(outcome))?;
                }
                continue;
            }
            // error[check-id]: remediation
            writeln!(writer, "{}: {}", self.prefix(outcome), outcome.message)?;
        }

        let summary = report.counts();
        if summary.failed == 0 {
            writeln!(
                writer,
                "{}",
                self.theme
                    .format_success(&format!("All {} condition(s) passed", summary.total))
            )?;
            return Ok(());
        }

        writeln!(writer)?;
        writeln!(
            writer,
            "Checked {} condition(s): {} passed, {} error(s), {} recommendation(s), {} notice(s)",
            summary.total,
            summary.passed,
            summary.errors,
            summary.recommendations,
            summary.informational
        )?;

        Ok(())
    }
}
