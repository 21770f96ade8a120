//! Checks that scripts can change their own abort and time-limit handling.

use crate::check::guard::{AbortFlagGuard, SettingGuard};
use crate::check::{Check, CheckContext, CheckId, Outcome, Severity};
use crate::error::Result;
use crate::runtime::Runtime;

const MAX_EXECUTION_TIME: &str = "max_execution_time";

/// Seconds the time-limit check adds to the current limit.
const TIME_LIMIT_STEP: u64 = 60;

/// Recommends allowing scripts to toggle `ignore_user_abort`.
pub struct UserAbortCheck;

impl Check for UserAbortCheck {
    fn id(&self) -> CheckId {
        CheckId::new("user-abort")
    }

    fn description(&self) -> &str {
        "ignore_user_abort can be changed at run time"
    }

    fn severity(&self) -> Severity {
        Severity::Recommendation
    }

    fn evaluate(&self, runtime: &mut dyn Runtime, _ctx: &CheckContext) -> Result<Vec<Outcome>> {
        let mut guard = AbortFlagGuard::acquire(runtime)?;
        let original = guard.original();

        guard.runtime().set_ignore_user_abort(!original)?;
        let passed = guard.runtime().ignore_user_abort()? != original;

        let message = "Your web server does not allow scripts to override user abort settings \
                       (http://php.net/manual/en/function.ignore-user-abort.php). This breaks \
                       scheduled tasks, future posting and pinging, and can make core upgrades \
                       fail. Ask your host to fix this."
            .to_string();
        Ok(vec![self.outcome(passed, message)])
    }
}

/// Recommends allowing scripts to raise their execution time limit.
pub struct MaxExecutionTimeCheck;

impl Check for MaxExecutionTimeCheck {
    fn id(&self) -> CheckId {
        CheckId::new("max-execution-time")
    }

    fn description(&self) -> &str {
        "max_execution_time can be raised at run time"
    }

    fn severity(&self) -> Severity {
        Severity::Recommendation
    }

    fn evaluate(&self, runtime: &mut dyn Runtime, _ctx: &CheckContext) -> Result<Vec<Outcome>> {
        let mut guard = SettingGuard::acquire(runtime, MAX_EXECUTION_TIME)?;
        let current = seconds(guard.original());
        let raised = current + TIME_LIMIT_STEP;

        guard.runtime().set_time_limit(raised)?;
        let applied = seconds(guard.runtime().setting(MAX_EXECUTION_TIME)?.as_deref());
        let passed = raised <= applied;

        let message = "Your web server does not allow scripts to raise the maximum execution \
                       time (http://php.net/manual/en/function.set-time-limit.php). This breaks \
                       scheduled tasks, future posting and pinging, and can make core upgrades \
                       fail. Ask your host to fix this."
            .to_string();
        Ok(vec![self.outcome(passed, message)])
    }
}

fn seconds(value: Option<&str>) -> u64 {
    value
        .map(str::trim)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
