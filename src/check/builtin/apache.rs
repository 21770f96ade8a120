//! Apache-only checks.
//!
//! Each of these produces no outcome when the runtime is not hosted by
//! Apache.

use crate::check::{Check, CheckContext, CheckId, Outcome, Severity};
use crate::error::Result;
use crate::runtime::Runtime;

/// Recommends having the Apache introspection functions available.
pub struct ApacheFunctionsCheck;

impl Check for ApacheFunctionsCheck {
    fn id(&self) -> CheckId {
        CheckId::new("apache-functions")
    }

    fn description(&self) -> &str {
        "apache_get_modules() is available under Apache"
    }

    fn severity(&self) -> Severity {
        Severity::Recommendation
    }

    fn evaluate(&self, runtime: &mut dyn Runtime, ctx: &CheckContext) -> Result<Vec<Outcome>> {
        if !ctx.is_apache() {
            return Ok(vec![]);
        }
        let passed = runtime.has_function("apache_get_modules")?;
        let message = "Your web server does not provide the Apache functions \
                       (http://php.net/manual/en/ref.apache.php). At worst this prevents \
                       mod_rewrite from being detected, which disables pretty permalinks; at \
                       best it makes detection slower. Ask your host to enable them."
            .to_string();
        Ok(vec![self.outcome(passed, message)])
    }
}

/// Recommends loading mod_rewrite.
pub struct ModRewriteCheck;

impl Check for ModRewriteCheck {
    fn id(&self) -> CheckId {
        CheckId::new("mod-rewrite")
    }

    fn description(&self) -> &str {
        "mod_rewrite is loaded under Apache"
    }

    fn severity(&self) -> Severity {
        Severity::Recommendation
    }

    fn evaluate(&self, runtime: &mut dyn Runtime, ctx: &CheckContext) -> Result<Vec<Outcome>> {
        if !ctx.is_apache() {
            return Ok(vec![]);
        }
        let passed = runtime.module_loaded("mod_rewrite")?;
        let message = "mod_rewrite was not detected on your web server, so pretty permalinks \
                       cannot be used. Ask your host to enable it."
            .to_string();
        Ok(vec![self.outcome(passed, message)])
    }
}

const MOD_SECURITY_SEARCH_URL: &str = "http://wordpress.org/search/mod_security?forums=1";
const MOD_SECURITY_THREAD_URL: &str = "http://wordpress.org/support/topic/256526";

/// Notes when mod_security is loaded; advisory only.
pub struct ModSecurityCheck;

impl Check for ModSecurityCheck {
    fn id(&self) -> CheckId {
        CheckId::new("mod-security")
    }

    fn description(&self) -> &str {
        "Notes whether mod_security is loaded under Apache"
    }

    fn severity(&self) -> Severity {
        Severity::Informational
    }

    fn evaluate(&self, runtime: &mut dyn Runtime, ctx: &CheckContext) -> Result<Vec<Outcome>> {
        if !ctx.is_apache() {
            return Ok(vec![]);
        }
        let passed = !runtime.module_loaded("mod_security")?;
        let message = format!(
            "Your web server has mod_security turned on. That is usually fine, but it should be \
             the first suspect for otherwise unexplained problems such as random 403/404 errors \
             or failures when uploading files or saving posts. If you see any, show your host \
             these support threads ({}), or see {} for ways to turn it off.",
            MOD_SECURITY_SEARCH_URL, MOD_SECURITY_THREAD_URL
        );
        Ok(vec![self.outcome(passed, message)])
    }
}
