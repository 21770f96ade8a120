//! Built-in checks.
//!
//! This module contains every check that ships with healthcheck, in the
//! order they run.

pub mod apache;
pub mod charset;
pub mod legacy;
pub mod libxml;
pub mod memory;
pub mod multibyte;
pub mod overrides;
pub mod upload;
pub mod version;

pub use apache::{ApacheFunctionsCheck, ModRewriteCheck, ModSecurityCheck};
pub use charset::DefaultCharsetCheck;
pub use legacy::IniFlagCheck;
pub use libxml::LibxmlXmlRpcCheck;
pub use memory::{MemoryLimitCheck, MemoryLimitOverrideCheck};
pub use multibyte::MultibyteStringCheck;
pub use overrides::{MaxExecutionTimeCheck, UserAbortCheck};
pub use upload::UploadSizeCheck;
pub use version::PhpVersionCheck;

use super::definition::Check;

/// Tunables for the built-in checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinOptions {
    /// Oldest interpreter version that passes `php-version`.
    pub minimum_php_version: String,
}

impl Default for BuiltinOptions {
    fn default() -> Self {
        Self {
            minimum_php_version: version::DEFAULT_MINIMUM_VERSION.to_string(),
        }
    }
}

/// Every built-in check, in run order.
pub fn with_options(options: &BuiltinOptions) -> Vec<Box<dyn Check>> {
    let mut checks: Vec<Box<dyn Check>> = vec![Box::new(PhpVersionCheck::new(
        options.minimum_php_version.clone(),
    ))];
    checks.extend(
        IniFlagCheck::legacy_flags()
            .into_iter()
            .map(|c| Box::new(c) as Box<dyn Check>),
    );
    checks.push(Box::new(MemoryLimitCheck));
    checks.push(Box::new(MemoryLimitOverrideCheck));
    checks.push(Box::new(ApacheFunctionsCheck));
    checks.push(Box::new(ModRewriteCheck));
    checks.push(Box::new(UserAbortCheck));
    checks.push(Box::new(MaxExecutionTimeCheck));
    checks.push(Box::new(UploadSizeCheck));
    checks.push(Box::new(MultibyteStringCheck));
    checks.push(Box::new(DefaultCharsetCheck));
    checks.push(Box::new(LibxmlXmlRpcCheck));
    checks.push(Box::new(ModSecurityCheck));
    checks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn defaults() -> Vec<Box<dyn Check>> {
        with_options(&BuiltinOptions::default())
    }

    #[test]
    fn builtin_ids_are_unique() {
        let checks = defaults();
        let ids: HashSet<String> = checks.iter().map(|c| c.id().0).collect();
        assert_eq!(ids.len(), checks.len());
    }

    #[test]
    fn builtins_start_with_version_and_end_with_mod_security() {
        let checks = defaults();
        assert_eq!(checks.first().map(|c| c.id().0), Some("php-version".into()));
        assert_eq!(checks.last().map(|c| c.id().0), Some("mod-security".into()));
    }

    #[test]
    fn every_builtin_has_a_description() {
        for check in defaults() {
            assert!(!check.description().is_empty(), "{}", check.id());
        }
    }
}
