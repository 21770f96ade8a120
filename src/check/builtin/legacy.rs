//! Legacy ini flags that should be switched off.
//!
//! These checks share one shape: read an ini value, fail when it is enabled.
//! They are table-driven through [`IniFlagCheck`].

use crate::check::{Check, CheckContext, CheckId, Outcome, Severity};
use crate::error::Result;
use crate::runtime::Runtime;

/// Fails when an ini setting is enabled (or, for paths, non-empty).
#[derive(Debug, Clone)]
pub struct IniFlagCheck {
    id: &'static str,
    setting: &'static str,
    description: &'static str,
    message: &'static str,
}

impl IniFlagCheck {
    /// Create a flag check.
    pub const fn new(
        id: &'static str,
        setting: &'static str,
        description: &'static str,
        message: &'static str,
    ) -> Self {
        Self {
            id,
            setting,
            description,
            message,
        }
    }

    /// The ini setting this check reads.
    pub fn setting(&self) -> &str {
        self.setting
    }

    /// The built-in legacy flag checks, in run order.
    pub fn legacy_flags() -> Vec<Self> {
        vec![
            Self::new(
                "safe-mode",
                "safe_mode",
                "safe_mode is off",
                "Your web server is running PHP with safe_mode turned on. Besides being an \
                 architecturally incorrect way to secure a web server, it introduces many quirks. \
                 It was deprecated in PHP 5.3 and removed in PHP 5.4 \
                 (http://php.net/manual/en/features.safe-mode.php). Ask your host to turn it off.",
            ),
            Self::new(
                "open-basedir",
                "open_basedir",
                "No open_basedir restriction is set",
                "Your web server is running PHP with an open_basedir restriction. It commonly \
                 stops uploaded files from being organized into folders and breaks some plugins. \
                 Ask your host to remove it.",
            ),
            Self::new(
                "register-globals",
                "register_globals",
                "register_globals is off",
                "Your web server is running PHP with register_globals turned on. It is a frequent \
                 source of security problems and was deprecated in PHP 5.3 \
                 (http://php.net/manual/en/ini.core.php#ini.register-globals). \
                 Ask your host to turn it off.",
            ),
            Self::new(
                "magic-quotes",
                "magic_quotes_gpc",
                "magic_quotes_gpc is off",
                "Your web server is running PHP with magic quotes turned on. They slow down web \
                 applications and mangle request data; they were deprecated in PHP 5.3 \
                 (http://php.net/manual/en/info.configuration.php#ini.magic-quotes-gpc). \
                 Ask your host to turn them off.",
            ),
            Self::new(
                "long-arrays",
                "register_long_arrays",
                "register_long_arrays is off",
                "Your web server is running PHP with register_long_arrays turned on. It slows \
                 down web applications and was deprecated in PHP 5.3 \
                 (http://php.net/manual/en/ini.core.php#ini.register-long-arrays). \
                 Ask your host to turn it off.",
            ),
        ]
    }
}

/// Interpret an ini value the way PHP's `(bool) ini_get(...)` would,
/// also accepting the spelled-out forms found in raw php.ini files.
pub fn ini_flag_enabled(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None => false,
        Some(v) => !matches!(
            v.to_ascii_lowercase().as_str(),
            "" | "0" | "off" | "false" | "no" | "none"
        ),
    }
}

impl Check for IniFlagCheck {
    fn id(&self) -> CheckId {
        CheckId::new(self.id)
    }

    fn description(&self) -> &str {
        self.description
    }

    fn severity(&self) -> Severity {
        Severity::Recommendation
    }

    fn evaluate(&self, runtime: &mut dyn Runtime, _ctx: &CheckContext) -> Result<Vec<Outcome>> {
        let value = runtime.setting(self.setting)?;
        let passed = !ini_flag_enabled(value.as_deref());
        Ok(vec![self.outcome(passed, self.message.to_string())])
    }
}
