//! Multibyte string support.

use crate::check::{Check, CheckContext, CheckId, Outcome, Severity};
use crate::error::Result;
use crate::runtime::Runtime;

const CONSEQUENCE: &str = "This can leave strings improperly sanitized when trackbacks, \
                           pingbacks and feeds contain multibyte characters. Ask your host to \
                           fix this.";

/// Recommends mbstring, iconv and Unicode-aware regular expressions.
///
/// Emits one outcome per capability, always three.
pub struct MultibyteStringCheck;

impl Check for MultibyteStringCheck {
    fn id(&self) -> CheckId {
        CheckId::new("multibyte-string")
    }

    fn description(&self) -> &str {
        "mbstring, iconv and UTF-8 regular expressions are available"
    }

    fn severity(&self) -> Severity {
        Severity::Recommendation
    }

    fn evaluate(&self, runtime: &mut dyn Runtime, _ctx: &CheckContext) -> Result<Vec<Outcome>> {
        let mbstring = runtime.has_function("mb_detect_encoding")?;
        let iconv = runtime.has_function("iconv")?;
        let unicode_regex = runtime.unicode_regex_supported()?;

        Ok(vec![
            self.outcome(
                mbstring,
                format!(
                    "Your web server does not support multibyte string functions \
                     (http://php.net/manual/en/intro.mbstring.php). {}",
                    CONSEQUENCE
                ),
            ),
            self.outcome(
                iconv,
                format!(
                    "Your web server does not support iconv functions \
                     (http://php.net/manual/en/intro.iconv.php). {}",
                    CONSEQUENCE
                ),
            ),
            self.outcome(
                unicode_regex,
                format!(
                    "Your web server does not support UTF-8 regular expressions; the /u \
                     modifier is not working \
                     (http://php.net/manual/en/reference.pcre.pattern.modifiers.php). {}",
                    CONSEQUENCE
                ),
            ),
        ])
    }
}
