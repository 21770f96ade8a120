//! Error types for health check operations.
//!
//! This module defines [`HealthCheckError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `HealthCheckError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `HealthCheckError::Other`) for unexpected errors
//! - A failing check condition is never an error; it is a non-passing
//!   [`Outcome`](crate::check::Outcome)

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for health check operations.
#[derive(Debug, Error)]
pub enum HealthCheckError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Failed to parse an environment snapshot.
    #[error("Failed to parse snapshot from {source_name}: {message}")]
    SnapshotParseError {
        source_name: String,
        message: String,
    },

    /// A check with the same id is already registered.
    #[error("Check '{id}' is already registered")]
    DuplicateCheck { id: String },

    /// A check id does not name any registered check.
    #[error("Unknown check: {id}")]
    UnknownCheck { id: String },

    /// Reading a value from the runtime failed.
    #[error("Probe '{probe}' failed: {message}")]
    ProbeFailed { probe: String, message: String },

    /// The interpreter binary could not be run or exited with an error.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for health check operations.
pub type Result<T> = std::result::Result<T, HealthCheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = HealthCheckError::ConfigNotFound {
            path: PathBuf::from("/etc/healthcheck.yml"),
        };
        assert!(err.to_string().contains("/etc/healthcheck.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = HealthCheckError::ConfigParseError {
            path: PathBuf::from("/healthcheck.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/healthcheck.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn snapshot_parse_error_displays_source() {
        let err = HealthCheckError::SnapshotParseError {
            source_name: "php -r".into(),
            message: "expected value".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("php -r"));
        assert!(msg.contains("expected value"));
    }

    #[test]
    fn duplicate_check_displays_id() {
        let err = HealthCheckError::DuplicateCheck {
            id: "memory-limit".into(),
        };
        assert!(err.to_string().contains("memory-limit"));
    }

    #[test]
    fn probe_failed_displays_probe_and_message() {
        let err = HealthCheckError::ProbeFailed {
            probe: "module_loaded(mod_rewrite)".into(),
            message: "module introspection unavailable".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("mod_rewrite"));
        assert!(msg.contains("unavailable"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = HealthCheckError::CommandFailed {
            command: "php -r".into(),
            code: Some(255),
        };
        let msg = err.to_string();
        assert!(msg.contains("php -r"));
        assert!(msg.contains("255"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: HealthCheckError = io_err.into();
        assert!(matches!(err, HealthCheckError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(HealthCheckError::UnknownCheck { id: "nope".into() })
        }
        assert!(returns_error().is_err());
    }
}
