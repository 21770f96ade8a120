//! Check registry.
//!
//! The [`CheckRegistry`] stores checks in registration order, which is also
//! the order they run and appear in reports.

use std::collections::HashSet;

use super::builtin::{self, BuiltinOptions};
use super::definition::{Check, CheckDescriptor, CheckId};
use crate::error::{HealthCheckError, Result};

/// Registry of checks, built once at startup.
#[derive(Default)]
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
    ids: HashSet<CheckId>,
}

impl CheckRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in checks.
    pub fn with_builtins() -> Result<Self> {
        Self::with_builtin_options(&BuiltinOptions::default())
    }

    /// Create a registry with all built-in checks, tuned by `options`.
    pub fn with_builtin_options(options: &BuiltinOptions) -> Result<Self> {
        let mut registry = Self::new();
        for check in builtin::with_options(options) {
            registry.register(check)?;
        }
        Ok(registry)
    }

    /// Register a check.
    ///
    /// Fails with [`HealthCheckError::DuplicateCheck`] if a check with the
    /// same ID is already registered.
    pub fn register(&mut self, check: Box<dyn Check>) -> Result<()> {
        let id = check.id();
        if !self.ids.insert(id.clone()) {
            return Err(HealthCheckError::DuplicateCheck { id: id.0 });
        }
        tracing::debug!("Registered check {}", id);
        self.checks.push(check);
        Ok(())
    }

    /// Get a check by ID.
    pub fn get(&self, id: &CheckId) -> Option<&dyn Check> {
        self.checks
            .iter()
            .find(|c| &c.id() == id)
            .map(|c| c.as_ref())
    }

    /// Whether a check with this ID is registered.
    pub fn contains(&self, id: &CheckId) -> bool {
        self.ids.contains(id)
    }

    /// Iterate over all checks in registration order.
    pub fn all(&self) -> impl Iterator<Item = &dyn Check> {
        self.checks.iter().map(|c| c.as_ref())
    }

    /// Descriptors of all checks in registration order.
    pub fn descriptors(&self) -> Vec<CheckDescriptor> {
        self.all().map(|c| c.descriptor()).collect()
    }

    /// Get the number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{CheckContext, Outcome, Severity};
    use crate::runtime::Runtime;

    struct MockCheck {
        id: &'static str,
    }

    impl Check for MockCheck {
        fn id(&self) -> CheckId {
            CheckId::new(self.id)
        }
        fn description(&self) -> &str {
            "A mock check for testing"
        }
        fn severity(&self) -> Severity {
            Severity::Recommendation
        }
        fn evaluate(
            &self,
            _runtime: &mut dyn Runtime,
            _ctx: &CheckContext,
        ) -> Result<Vec<Outcome>> {
            Ok(vec![])
        }
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = CheckRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registry_register_and_get() {
        let mut registry = CheckRegistry::new();
        registry
            .register(Box::new(MockCheck { id: "mock" }))
            .unwrap();

        assert!(!registry.is_empty());
        assert!(registry.get(&CheckId::new("mock")).is_some());
        assert!(registry.get(&CheckId::new("unknown")).is_none());
        assert!(registry.contains(&CheckId::new("mock")));
    }

    #[test]
    fn registry_rejects_duplicate_ids() {
        let mut registry = CheckRegistry::new();
        registry
            .register(Box::new(MockCheck { id: "mock" }))
            .unwrap();

        let err = registry
            .register(Box::new(MockCheck { id: "mock" }))
            .unwrap_err();

        assert!(matches!(err, HealthCheckError::DuplicateCheck { ref id } if id == "mock"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registry_preserves_registration_order() {
        let mut registry = CheckRegistry::new();
        for id in ["zeta", "alpha", "mid"] {
            registry.register(Box::new(MockCheck { id })).unwrap();
        }

        let ids: Vec<String> = registry.all().map(|c| c.id().0).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);

        // Restartable
        assert_eq!(registry.all().count(), 3);
    }

    #[test]
    fn registry_with_builtins_has_checks() {
        let registry = CheckRegistry::with_builtins().unwrap();
        assert_eq!(registry.len(), 17);
        for id in [
            "php-version",
            "safe-mode",
            "open-basedir",
            "register-globals",
            "magic-quotes",
            "long-arrays",
            "memory-limit",
            "memory-limit-override",
            "apache-functions",
            "mod-rewrite",
            "user-abort",
            "max-execution-time",
            "upload-size",
            "multibyte-string",
            "default-charset",
            "libxml-xmlrpc",
            "mod-security",
        ] {
            assert!(registry.get(&CheckId::new(id)).is_some(), "missing {}", id);
        }
    }

    #[test]
    fn descriptors_follow_registration_order() {
        let registry = CheckRegistry::with_builtins().unwrap();
        let descriptors = registry.descriptors();
        assert_eq!(descriptors[0].id, CheckId::new("php-version"));
        assert_eq!(descriptors.len(), registry.len());
    }
}
