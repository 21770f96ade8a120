//! Interpreter version check.

use std::cmp::Ordering;

use crate::check::{Check, CheckContext, CheckId, Outcome, Severity};
use crate::error::Result;
use crate::runtime::{compare_versions, Runtime};

/// Default oldest supported interpreter version.
pub const DEFAULT_MINIMUM_VERSION: &str = "5.0.0";

const ARCHIVE_URL: &str = "http://www.php.net/archive/2007.php#2007-07-13-1";

/// Recommends upgrading interpreters older than a minimum version.
pub struct PhpVersionCheck {
    minimum: String,
}

impl PhpVersionCheck {
    /// Create a check with the given minimum version.
    pub fn new(minimum: impl Into<String>) -> Self {
        Self {
            minimum: minimum.into(),
        }
    }
}

impl Default for PhpVersionCheck {
    fn default() -> Self {
        Self::new(DEFAULT_MINIMUM_VERSION)
    }
}

impl Check for PhpVersionCheck {
    fn id(&self) -> CheckId {
        CheckId::new("php-version")
    }

    fn description(&self) -> &str {
        "PHP version is recent enough to receive security updates"
    }

    fn severity(&self) -> Severity {
        Severity::Recommendation
    }

    fn evaluate(&self, runtime: &mut dyn Runtime, _ctx: &CheckContext) -> Result<Vec<Outcome>> {
        let version = runtime.version()?;
        let passed = compare_versions(&version, &self.minimum) != Ordering::Less;
        let message = format!(
            "Your web server is running PHP {}, which no longer receives security updates \
             (see {}). Support for it will be dropped; ask your host to upgrade to PHP {} or newer.",
            version, ARCHIVE_URL, self.minimum
        );
        Ok(vec![self.outcome(passed, message)])
    }
}
