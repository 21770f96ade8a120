//! Capturing snapshots from a PHP binary.
//!
//! The probe runs a small inline script with `php -r`. The script reads every
//! value the built-in checks need, tries the run-time overrides inside the
//! interpreter (restoring them before it exits), and prints a JSON
//! [`Snapshot`].
//!
//! # Example
//!
//! ```no_run
//! use healthcheck::runtime::{PhpProbe, SnapshotRuntime};
//!
//! let snapshot = PhpProbe::new("php").capture().unwrap();
//! let runtime = SnapshotRuntime::new(snapshot);
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context;

use super::Snapshot;
use crate::error::{HealthCheckError, Result};

/// Ini settings copied into the snapshot.
pub const PROBED_SETTINGS: &[&str] = &[
    "safe_mode",
    "open_basedir",
    "register_globals",
    "magic_quotes_gpc",
    "register_long_arrays",
    "memory_limit",
    "max_execution_time",
    "upload_max_filesize",
    "post_max_size",
    "default_charset",
];

/// Functions whose presence is recorded in the snapshot.
pub const PROBED_FUNCTIONS: &[&str] = &["mb_detect_encoding", "iconv", "apache_get_modules"];

const PROBE_SCRIPT: &str = r#"
$settings = array();
foreach (explode(',', getenv('HEALTHCHECK_SETTINGS')) as $name) {
    $value = ini_get($name);
    if ($value !== false) {
        $settings[$name] = (string) $value;
    }
}

$locked = array();
$original = ini_get('memory_limit');
$test = (intval($original) == 247) ? 248 : 247;
@ini_set('memory_limit', $test . 'M');
if (intval(ini_get('memory_limit')) != $test) {
    $locked[] = 'memory_limit';
}
@ini_set('memory_limit', $original);

$original = intval(ini_get('max_execution_time'));
@set_time_limit($original + 60);
if (intval(ini_get('max_execution_time')) < $original + 60) {
    $locked[] = 'max_execution_time';
}
@set_time_limit($original);

$abort = (bool) ignore_user_abort();
@ignore_user_abort(!$abort);
$abort_locked = ((bool) ignore_user_abort()) === $abort;
@ignore_user_abort($abort);

$functions = array();
foreach (explode(',', getenv('HEALTHCHECK_FUNCTIONS')) as $name) {
    if (function_exists($name)) {
        $functions[] = $name;
    }
}

echo json_encode(array(
    'php_version' => PHP_VERSION,
    'server' => strpos(php_sapi_name(), 'apache') === 0 ? 'apache' : 'other',
    'settings' => (object) $settings,
    'locked' => $locked,
    'functions' => $functions,
    'modules' => function_exists('apache_get_modules') ? array_values(apache_get_modules()) : null,
    'unicode_regex' => (bool) @preg_match('/^\pL/u', 'a'),
    'libxml_version' => defined('LIBXML_DOTTED_VERSION') ? LIBXML_DOTTED_VERSION : null,
    'ignore_user_abort' => $abort,
    'abort_locked' => $abort_locked,
));
"#;

/// Captures a [`Snapshot`] by running a PHP binary.
#[derive(Debug, Clone)]
pub struct PhpProbe {
    binary: PathBuf,
}

impl PhpProbe {
    /// Create a probe for the given PHP binary (a path or a name on PATH).
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// The PHP binary this probe runs.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Run the probe script and parse its output.
    pub fn capture(&self) -> Result<Snapshot> {
        let command = format!("{} -r <probe>", self.binary.display());
        tracing::debug!("Probing PHP runtime: {}", command);

        let output = Command::new(&self.binary)
            .args(["-d", "display_errors=stderr", "-r", PROBE_SCRIPT])
            .env("HEALTHCHECK_SETTINGS", PROBED_SETTINGS.join(","))
            .env("HEALTHCHECK_FUNCTIONS", PROBED_FUNCTIONS.join(","))
            .output()
            .map_err(|e| {
                tracing::debug!("Failed to start {}: {}", self.binary.display(), e);
                HealthCheckError::CommandFailed {
                    command: command.clone(),
                    code: None,
                }
            })?;

        if !output.status.success() {
            tracing::debug!(
                "PHP probe stderr: {}",
                String::from_utf8_lossy(&output.stderr)
            );
            return Err(HealthCheckError::CommandFailed {
                command,
                code: output.status.code(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let snapshot = parse_probe_output(&stdout)?;
        tracing::debug!(
            "Captured PHP {} ({} settings)",
            snapshot.php_version,
            snapshot.settings.len()
        );
        Ok(snapshot)
    }
}

/// Parse the JSON printed by the probe script.
///
/// Startup notices printed before the JSON document are skipped.
pub fn parse_probe_output(stdout: &str) -> anyhow::Result<Snapshot> {
    let start = stdout
        .find('{')
        .context("PHP probe printed no JSON document")?;
    serde_json::from_str(stdout[start..].trim_end()).context("Failed to parse PHP probe output")
}
