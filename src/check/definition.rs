//! Check definitions.
//!
//! This module provides the core traits and types for defining checks:
//!
//! - [`Check`] - The trait that all checks must implement
//! - [`CheckId`] - Unique identifier for a check
//! - [`Severity`] - How serious a failing outcome is
//! - [`CheckContext`] - Explicit inputs shared by every evaluation

use serde::Serialize;

use super::outcome::Outcome;
use crate::error::Result;
use crate::runtime::{Runtime, ServerFamily};

/// Unique identifier for a check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CheckId(pub String);

impl CheckId {
    /// Create a new check ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CheckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity level for check outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory only, never a problem by itself.
    Informational,
    /// Should be fixed; the application may misbehave.
    Recommendation,
    /// Known to break the application.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Informational => write!(f, "info"),
            Severity::Recommendation => write!(f, "recommendation"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Identity of a registered check, as shown by `healthcheck list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckDescriptor {
    /// Unique check ID.
    pub id: CheckId,
    /// What the check looks at.
    pub description: String,
    /// Severity of a failing outcome.
    pub severity: Severity,
}

/// Inputs passed to every evaluation alongside the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckContext {
    /// Server family; Apache-only checks skip when this is not Apache.
    pub server: ServerFamily,
}

impl CheckContext {
    /// Create a context for the given server family.
    pub fn new(server: ServerFamily) -> Self {
        Self { server }
    }

    /// Whether the runtime is hosted by Apache.
    pub fn is_apache(&self) -> bool {
        self.server == ServerFamily::Apache
    }
}

/// A single environment diagnostic.
///
/// `evaluate` returns an empty vector when the check does not apply, one
/// outcome per tested condition otherwise. An `Err` means a probe itself
/// failed; the runner turns it into an error outcome.
pub trait Check {
    /// Unique identifier for this check.
    fn id(&self) -> CheckId;

    /// Description of what this check looks at.
    fn description(&self) -> &str;

    /// Severity of a failing outcome.
    fn severity(&self) -> Severity;

    /// Evaluate the check against a runtime.
    fn evaluate(&self, runtime: &mut dyn Runtime, ctx: &CheckContext) -> Result<Vec<Outcome>>;

    /// Descriptor for listings and registration.
    fn descriptor(&self) -> CheckDescriptor {
        CheckDescriptor {
            id: self.id(),
            description: self.description().to_string(),
            severity: self.severity(),
        }
    }

    /// Build an outcome for this check at its default severity.
    fn outcome(&self, passed: bool, message: String) -> Outcome {
        Outcome::new(self.id(), passed, self.severity(), message)
    }
}
