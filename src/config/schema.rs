//! Configuration schema.
//!
//! # Example
//!
//! ```yaml
//! php: /usr/bin/php8.2
//! server: apache
//! minimum_php_version: "7.4"
//! skip:
//!   - mod-security
//! strict: true
//! format: json
//! ```

use serde::{Deserialize, Serialize};

use crate::check::{BuiltinOptions, Selection};
use crate::report::OutputFormat;
use crate::runtime::ServerFamily;

/// Interpreter binary used when none is configured.
pub const DEFAULT_PHP_BINARY: &str = "php";

/// Contents of `healthcheck.yml`.
///
/// Every field is optional. Unset fields fall back to built-in defaults and
/// command-line flags override whatever is set here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HealthCheckConfig {
    /// Interpreter binary to probe.
    pub php: Option<String>,

    /// Server family, overriding whatever the snapshot or probe reports.
    pub server: Option<ServerFamily>,

    /// Oldest interpreter version that passes `php-version`.
    pub minimum_php_version: Option<String>,

    /// Check IDs never to run.
    pub skip: Vec<String>,

    /// Run only these check IDs.
    pub only: Vec<String>,

    /// Treat failed recommendations as run failures.
    pub strict: bool,

    /// Report format.
    pub format: Option<OutputFormat>,
}

impl HealthCheckConfig {
    /// Interpreter binary, defaulting to `php` on the `PATH`.
    pub fn php_binary(&self) -> &str {
        self.php.as_deref().unwrap_or(DEFAULT_PHP_BINARY)
    }

    /// Options for the built-in checks.
    pub fn builtin_options(&self) -> BuiltinOptions {
        let mut options = BuiltinOptions::default();
        if let Some(ref minimum) = self.minimum_php_version {
            options.minimum_php_version = minimum.clone();
        }
        options
    }

    /// Check selection described by `only` and `skip`.
    pub fn selection(&self) -> Selection {
        Selection::new(self.only.iter().cloned(), self.skip.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::CheckId;

    #[test]
    fn empty_config_uses_defaults() {
        let config: HealthCheckConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, HealthCheckConfig::default());
        assert_eq!(config.php_binary(), "php");
        assert_eq!(config.builtin_options(), BuiltinOptions::default());
        assert!(!config.strict);
    }

    #[test]
    fn parses_full_config() {
        let yaml = r#"
php: /usr/bin/php8.2
server: apache
minimum_php_version: "7.4"
skip: [mod-security]
only: [memory-limit, mod-security]
strict: true
format: json
"#;
        let config: HealthCheckConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.php_binary(), "/usr/bin/php8.2");
        assert_eq!(config.server, Some(ServerFamily::Apache));
        assert_eq!(config.builtin_options().minimum_php_version, "7.4");
        assert!(config.strict);
        assert_eq!(config.format, Some(OutputFormat::Json));

        let selection = config.selection();
        assert!(selection.includes(&CheckId::new("memory-limit")));
        assert!(!selection.includes(&CheckId::new("mod-security")));
        assert!(!selection.includes(&CheckId::new("php-version")));
    }

    #[test]
    fn rejects_unknown_fields() {
        let result: Result<HealthCheckConfig, _> = serde_yaml::from_str("colour: true");
        assert!(result.is_err());
    }
}
