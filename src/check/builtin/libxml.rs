//! libxml2 versions that break XML-RPC.

use std::cmp::Ordering;

use crate::check::{Check, CheckContext, CheckId, Outcome, Severity};
use crate::error::Result;
use crate::runtime::{compare_versions, Runtime};

/// libxml2 releases that strip angle brackets from XML-RPC payloads.
const BROKEN_VERSIONS: &[&str] = &["2.6.27", "2.7.0", "2.7.1", "2.7.2"];

/// Broken only when paired with PHP older than [`FIXED_PHP_VERSION`].
const BROKEN_WITH_OLD_PHP: &str = "2.7.3";
const FIXED_PHP_VERSION: &str = "5.2.9";

const FIX_URL: &str = "http://josephscott.org/code/wordpress/plugin-libxml2-fix/";

/// Whether a libxml2/PHP pairing is known to break XML-RPC.
pub fn is_broken_pairing(libxml: &str, php: &str) -> bool {
    BROKEN_VERSIONS.contains(&libxml)
        || (libxml == BROKEN_WITH_OLD_PHP
            && compare_versions(php, FIXED_PHP_VERSION) == Ordering::Less)
}

/// Fails on libxml2 releases known to break XML-RPC posting.
///
/// Passes when the XML extension is not loaded.
pub struct LibxmlXmlRpcCheck;

impl Check for LibxmlXmlRpcCheck {
    fn id(&self) -> CheckId {
        CheckId::new("libxml-xmlrpc")
    }

    fn description(&self) -> &str {
        "libxml2 is not a release that breaks XML-RPC"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn evaluate(&self, runtime: &mut dyn Runtime, _ctx: &CheckContext) -> Result<Vec<Outcome>> {
        let php = runtime.version()?;
        let Some(libxml) = runtime.libxml_version()? else {
            tracing::debug!("libxml2 not present");
            return Ok(vec![self.outcome(true, "libxml2 is not loaded".to_string())]);
        };
        let passed = !is_broken_pairing(&libxml, &php);
        let message = format!(
            "Your web server is running PHP {} with libxml2 {}, which breaks XML-RPC remote \
             posting. See {} for details and a stop-gap fix. Ask your host to upgrade libxml2.",
            php, libxml, FIX_URL
        );
        Ok(vec![self.outcome(passed, message)])
    }
}
