//! `default_charset` validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::check::{Check, CheckContext, CheckId, Outcome, Severity};
use crate::error::Result;
use crate::runtime::Runtime;

/// Longest charset name accepted.
pub const MAX_CHARSET_LEN: usize = 40;

static ILLEGAL_CHARSET_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[^a-z0-9_.:\-]").unwrap());

/// Whether a charset name only uses legal characters and is short enough.
pub fn is_valid_charset(configured: &str) -> bool {
    let filtered = ILLEGAL_CHARSET_CHARS.replace_all(configured, "");
    filtered == configured && configured.len() <= MAX_CHARSET_LEN
}

/// Fails when `default_charset` would produce a broken `Content-Type` header.
pub struct DefaultCharsetCheck;

impl Check for DefaultCharsetCheck {
    fn id(&self) -> CheckId {
        CheckId::new("default-charset")
    }

    fn description(&self) -> &str {
        "default_charset contains only legal characters"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn evaluate(&self, runtime: &mut dyn Runtime, _ctx: &CheckContext) -> Result<Vec<Outcome>> {
        let configured = runtime.setting("default_charset")?.unwrap_or_default();
        let passed = is_valid_charset(&configured);
        let message = format!(
            "The default character set configured in php.ini ({}) contains illegal characters \
             or is longer than {} characters. Ask your host to fix this.",
            configured, MAX_CHARSET_LEN
        );
        Ok(vec![self.outcome(passed, message)])
    }
}
