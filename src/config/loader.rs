//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::HealthCheckConfig;
use crate::error::{HealthCheckError, Result};

/// Config file looked for in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "healthcheck.yml";

/// Default config path for a working directory.
pub fn default_config_path(working_dir: &Path) -> PathBuf {
    working_dir.join(DEFAULT_CONFIG_FILE)
}

/// Load a config file from disk.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist, or
/// `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<HealthCheckConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            HealthCheckError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            HealthCheckError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a config.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<HealthCheckConfig> {
    // An empty file is a valid, empty config.
    if content.trim().is_empty() {
        return Ok(HealthCheckConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| HealthCheckError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load configuration, respecting `--config` override.
///
/// An explicit path must exist. Without one, `healthcheck.yml` in the
/// working directory is used when present and defaults otherwise.
pub fn load_config(
    working_dir: &Path,
    config_override: Option<&Path>,
) -> Result<HealthCheckConfig> {
    if let Some(override_path) = config_override {
        tracing::debug!("Loading config from {}", override_path.display());
        return load_config_file(override_path);
    }

    let path = default_config_path(working_dir);
    if path.exists() {
        tracing::debug!("Loading config from {}", path.display());
        load_config_file(&path)
    } else {
        tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
        Ok(HealthCheckConfig::default())
    }
}
