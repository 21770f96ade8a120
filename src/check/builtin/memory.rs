//! Memory limit checks.

use crate::check::guard::SettingGuard;
use crate::check::{Check, CheckContext, CheckId, Outcome, Severity};
use crate::error::Result;
use crate::runtime::{parse_size, Runtime, MEGABYTE};

const SETTING: &str = "memory_limit";

/// Smallest memory limit that passes, in megabytes.
pub const MINIMUM_MEMORY_MB: i64 = 32;

/// Value the override check tries to set, in megabytes.
const OVERRIDE_PROBE_MB: i64 = 247;

/// Whether a `memory_limit` value is unlimited (unset, empty, `0` or negative).
fn is_unlimited(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") => true,
        Some(v) => parse_size(v) <= 0 && v.starts_with(['-', '0']),
    }
}

/// Recommends a memory limit of at least 32 MB.
pub struct MemoryLimitCheck;

impl Check for MemoryLimitCheck {
    fn id(&self) -> CheckId {
        CheckId::new("memory-limit")
    }

    fn description(&self) -> &str {
        "memory_limit is at least 32M"
    }

    fn severity(&self) -> Severity {
        Severity::Recommendation
    }

    fn evaluate(&self, runtime: &mut dyn Runtime, _ctx: &CheckContext) -> Result<Vec<Outcome>> {
        let value = runtime.setting(SETTING)?;
        let passed = is_unlimited(value.as_deref())
            || value.as_deref().map(parse_size).unwrap_or(0) >= MINIMUM_MEMORY_MB * MEGABYTE;
        let message = format!(
            "Your web server is running PHP with a low memory limit ({}). This can stop the \
             application from working during core upgrades, with feature-heavy themes or with \
             many plugins enabled, usually as a \"Failed to allocate memory\" error or a blank \
             screen. Ask your host to raise memory_limit to {}M or more (48M or 64M with many \
             plugins).",
            value.as_deref().unwrap_or(""),
            MINIMUM_MEMORY_MB
        );
        Ok(vec![self.outcome(passed, message)])
    }
}

/// Recommends allowing scripts to raise the memory limit at run time.
pub struct MemoryLimitOverrideCheck;

impl Check for MemoryLimitOverrideCheck {
    fn id(&self) -> CheckId {
        CheckId::new("memory-limit-override")
    }

    fn description(&self) -> &str {
        "memory_limit can be raised at run time"
    }

    fn severity(&self) -> Severity {
        Severity::Recommendation
    }

    fn evaluate(&self, runtime: &mut dyn Runtime, _ctx: &CheckContext) -> Result<Vec<Outcome>> {
        let mut guard = SettingGuard::acquire(runtime, SETTING)?;

        let current_mb = guard.original().map(parse_size).unwrap_or(0) / MEGABYTE;
        let probe_mb = if current_mb == OVERRIDE_PROBE_MB {
            OVERRIDE_PROBE_MB + 1
        } else {
            OVERRIDE_PROBE_MB
        };

        guard
            .runtime()
            .set_setting(SETTING, Some(&format!("{}M", probe_mb)))?;
        let applied = guard.runtime().setting(SETTING)?;
        let passed = applied.as_deref().map(parse_size) == Some(probe_mb * MEGABYTE);

        let message = "Your web server does not allow PHP to raise the memory limit at run time. \
                       Core upgrades raise it to 256M to unpack files, so they may fail with a \
                       \"Failed to allocate memory\" error or a blank screen. Ask your host to \
                       allow memory_limit overrides."
            .to_string();
        Ok(vec![self.outcome(passed, message)])
    }
}
