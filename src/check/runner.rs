//! Running registered checks.
//!
//! The [`CheckRunner`] evaluates checks in registration order and records
//! every outcome in a [`Report`]. A check whose probe fails (or that panics)
//! is reported as an error outcome and the run continues.

use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};

use super::definition::{Check, CheckContext, CheckId};
use super::outcome::Outcome;
use super::registry::CheckRegistry;
use crate::error::{HealthCheckError, Result};
use crate::report::Report;
use crate::runtime::Runtime;

/// Which registered checks to run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Run only these checks (all when empty).
    pub only: HashSet<CheckId>,
    /// Never run these checks.
    pub skip: HashSet<CheckId>,
}

impl Selection {
    /// Build a selection from check ID strings.
    pub fn new<I, J, S, T>(only: I, skip: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            only: only.into_iter().map(CheckId::new).collect(),
            skip: skip.into_iter().map(CheckId::new).collect(),
        }
    }

    /// Whether a check is selected.
    pub fn includes(&self, id: &CheckId) -> bool {
        (self.only.is_empty() || self.only.contains(id)) && !self.skip.contains(id)
    }

    /// Reject IDs that do not name a registered check.
    pub fn validate(&self, registry: &CheckRegistry) -> Result<()> {
        let mut unknown: Vec<&CheckId> = self
            .only
            .iter()
            .chain(self.skip.iter())
            .filter(|id| !registry.contains(id))
            .collect();
        unknown.sort();
        match unknown.first() {
            Some(id) => Err(HealthCheckError::UnknownCheck { id: id.0.clone() }),
            None => Ok(()),
        }
    }
}

/// Evaluates registered checks against a runtime.
pub struct CheckRunner<'r> {
    registry: &'r CheckRegistry,
    context: CheckContext,
    selection: Selection,
}

impl<'r> CheckRunner<'r> {
    /// Create a runner over every check in the registry.
    pub fn new(registry: &'r CheckRegistry, context: CheckContext) -> Self {
        Self {
            registry,
            context,
            selection: Selection::default(),
        }
    }

    /// Restrict the run to a selection of checks.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Run every selected check, returning a fresh report.
    pub fn run(&self, runtime: &mut dyn Runtime) -> Report {
        let mut report = Report::new();
        self.run_into(runtime, &mut report);
        report
    }

    /// Run every selected check, recording outcomes into `report`.
    pub fn run_into(&self, runtime: &mut dyn Runtime, report: &mut Report) {
        for check in self.registry.all() {
            let id = check.id();
            if !self.selection.includes(&id) {
                tracing::debug!("Skipping deselected check {}", id);
                continue;
            }
            for outcome in self.evaluate(check, runtime) {
                report.record(outcome);
            }
        }
    }

    /// Evaluate one check, converting probe failures into outcomes.
    pub fn evaluate(&self, check: &dyn Check, runtime: &mut dyn Runtime) -> Vec<Outcome> {
        let id = check.id();
        tracing::debug!("Evaluating check {}", id);

        let result = catch_unwind(AssertUnwindSafe(|| check.evaluate(runtime, &self.context)));
        match result {
            Ok(Ok(outcomes)) => {
                if outcomes.is_empty() {
                    tracing::debug!("Check {} does not apply", id);
                }
                outcomes
            }
            Ok(Err(e)) => {
                tracing::warn!("Check {} failed to evaluate: {}", id, e);
                vec![Outcome::evaluation_failure(id, e)]
            }
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "check panicked".to_string());
                tracing::warn!("Check {} panicked: {}", id, reason);
                vec![Outcome::evaluation_failure(id, reason)]
            }
        }
    }
}
