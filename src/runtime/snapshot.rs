//! Serializable environment snapshots and the runtime built on them.
//!
//! A [`Snapshot`] records everything the built-in checks read from a PHP
//! interpreter. It can be captured from a live binary with
//! [`PhpProbe`](super::PhpProbe), saved as YAML or JSON, and replayed later
//! through [`SnapshotRuntime`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Runtime;
use crate::error::{HealthCheckError, Result};

/// Family of web server the interpreter runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ServerFamily {
    /// Apache httpd, which exposes module introspection.
    Apache,
    /// Any other server (IIS, nginx + FPM, CLI).
    #[default]
    Other,
}

impl fmt::Display for ServerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerFamily::Apache => write!(f, "apache"),
            ServerFamily::Other => write!(f, "other"),
        }
    }
}

/// Point-in-time view of interpreter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Interpreter version string.
    #[serde(deserialize_with = "scalar_string")]
    pub php_version: String,

    /// Server family the interpreter runs under.
    pub server: ServerFamily,

    /// Ini settings by name. Absent keys are unset.
    #[serde(deserialize_with = "scalar_settings")]
    pub settings: BTreeMap<String, String>,

    /// Settings that refuse run-time overrides.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub locked: BTreeSet<String>,

    /// Functions available to scripts.
    pub functions: BTreeSet<String>,

    /// Loaded web server modules. `None` when the server cannot list them.
    pub modules: Option<BTreeSet<String>>,

    /// Whether `/^\pL/u` matches.
    pub unicode_regex: bool,

    /// Dotted libxml2 version, if the XML extension is loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub libxml_version: Option<String>,

    /// Current `ignore_user_abort` flag.
    pub ignore_user_abort: bool,

    /// Whether the `ignore_user_abort` flag refuses changes.
    pub abort_locked: bool,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            php_version: String::new(),
            server: ServerFamily::Other,
            settings: BTreeMap::new(),
            locked: BTreeSet::new(),
            functions: BTreeSet::new(),
            modules: None,
            unicode_regex: true,
            libxml_version: None,
            ignore_user_abort: false,
            abort_locked: false,
        }
    }
}

impl Snapshot {
    /// Parse a snapshot from YAML or JSON text.
    ///
    /// JSON is a subset of YAML, so a single parser handles both.
    pub fn parse(content: &str, source_name: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| HealthCheckError::SnapshotParseError {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })
    }

    /// Load a snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| HealthCheckError::Other(e.into()))
    }

    /// Render as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| HealthCheckError::Other(e.into()))
    }
}

/// Render a YAML scalar the way `ini_get` would return it.
fn scalar_to_ini(value: serde_yaml::Value) -> std::result::Result<Option<String>, String> {
    match value {
        serde_yaml::Value::Null => Ok(None),
        serde_yaml::Value::String(s) => Ok(Some(s)),
        serde_yaml::Value::Number(n) => Ok(Some(n.to_string())),
        serde_yaml::Value::Bool(b) => Ok(Some(if b { "1" } else { "0" }.to_string())),
        other => Err(format!("expected a scalar value, found {:?}", other)),
    }
}

fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    scalar_to_ini(value)
        .map(Option::unwrap_or_default)
        .map_err(serde::de::Error::custom)
}

fn scalar_settings<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = BTreeMap::<String, serde_yaml::Value>::deserialize(deserializer)?;
    let mut settings = BTreeMap::new();
    for (name, value) in raw {
        if let Some(value) = scalar_to_ini(value).map_err(serde::de::Error::custom)? {
            settings.insert(name, value);
        }
    }
    Ok(settings)
}

/// A [`Runtime`] backed by an in-memory [`Snapshot`].
///
/// Overrides mutate the snapshot unless the setting is listed in
/// [`Snapshot::locked`], in which case they are silently dropped.
#[derive(Debug, Clone)]
pub struct SnapshotRuntime {
    snapshot: Snapshot,
}

impl SnapshotRuntime {
    /// Wrap a snapshot.
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Current state, including any overrides still in effect.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

impl Runtime for SnapshotRuntime {
    fn version(&self) -> Result<String> {
        Ok(self.snapshot.php_version.clone())
    }

    fn setting(&self, name: &str) -> Result<Option<String>> {
        Ok(self.snapshot.settings.get(name).cloned())
    }

    fn set_setting(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        if self.snapshot.locked.contains(name) {
            tracing::debug!("Ignoring override of locked setting {}", name);
            return Ok(());
        }
        match value {
            Some(value) => {
                self.snapshot
                    .settings
                    .insert(name.to_string(), value.to_string());
            }
            None => {
                self.snapshot.settings.remove(name);
            }
        }
        Ok(())
    }

    fn has_function(&self, name: &str) -> Result<bool> {
        Ok(self.snapshot.functions.contains(name))
    }

    fn module_loaded(&self, name: &str) -> Result<bool> {
        match &self.snapshot.modules {
            Some(modules) => Ok(modules.contains(name)),
            None => Err(HealthCheckError::ProbeFailed {
                probe: format!("module_loaded({})", name),
                message: "the server does not expose its module list".to_string(),
            }),
        }
    }

    fn ignore_user_abort(&self) -> Result<bool> {
        Ok(self.snapshot.ignore_user_abort)
    }

    fn set_ignore_user_abort(&mut self, value: bool) -> Result<()> {
        if !self.snapshot.abort_locked {
            self.snapshot.ignore_user_abort = value;
        }
        Ok(())
    }

    fn set_time_limit(&mut self, seconds: u64) -> Result<()> {
        self.set_setting("max_execution_time", Some(&seconds.to_string()))
    }

    fn unicode_regex_supported(&self) -> Result<bool> {
        Ok(self.snapshot.unicode_regex)
    }

    fn libxml_version(&self) -> Result<Option<String>> {
        Ok(self.snapshot.libxml_version.clone())
    }
}
