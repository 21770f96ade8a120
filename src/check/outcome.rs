//! Check outcomes.

use serde::Serialize;

use super::definition::{CheckId, Severity};

/// The result of testing one condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// The check that produced this outcome.
    pub check_id: CheckId,
    /// Whether the condition holds.
    pub passed: bool,
    /// How serious a failure is.
    pub severity: Severity,
    /// Remediation message.
    pub message: String,
}

impl Outcome {
    /// Create a new outcome.
    pub fn new(
        check_id: CheckId,
        passed: bool,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            check_id,
            passed,
            severity,
            message: message.into(),
        }
    }

    /// Outcome for a check whose probe failed rather than its condition.
    pub fn evaluation_failure(check_id: CheckId, reason: impl std::fmt::Display) -> Self {
        let message = format!("Check '{}' could not be evaluated: {}", check_id, reason);
        Self::new(check_id, false, Severity::Error, message)
    }

    /// Whether this outcome is a failure at the given severity.
    pub fn is_failure(&self, severity: Severity) -> bool {
        !self.passed && self.severity == severity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_creation() {
        let outcome = Outcome::new(
            CheckId::new("memory-limit"),
            false,
            Severity::Recommendation,
            "Low memory limit",
        );

        assert_eq!(outcome.check_id, CheckId::new("memory-limit"));
        assert!(!outcome.passed);
        assert_eq!(outcome.severity, Severity::Recommendation);
        assert_eq!(outcome.message, "Low memory limit");
    }

    #[test]
    fn evaluation_failure_is_error_naming_check() {
        let outcome = Outcome::evaluation_failure(CheckId::new("mod-rewrite"), "no module list");

        assert!(!outcome.passed);
        assert_eq!(outcome.severity, Severity::Error);
        assert!(outcome.message.contains("mod-rewrite"));
        assert!(outcome.message.contains("no module list"));
    }

    #[test]
    fn is_failure_matches_severity() {
        let outcome = Outcome::new(CheckId::new("x"), false, Severity::Error, "bad");
        assert!(outcome.is_failure(Severity::Error));
        assert!(!outcome.is_failure(Severity::Recommendation));

        let passed = Outcome::new(CheckId::new("x"), true, Severity::Error, "fine");
        assert!(!passed.is_failure(Severity::Error));
    }
}
