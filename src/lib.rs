//! healthcheck - Diagnose PHP runtime configuration for web applications.
//!
//! healthcheck runs a fixed set of environment diagnostics against a PHP
//! runtime and reports, per condition, whether it holds, how serious a
//! failure is, and what to ask the hosting provider to change.
//!
//! # Modules
//!
//! - [`check`] - Check trait, registry, runner and the built-in checks
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Optional `healthcheck.yml` loading
//! - [`error`] - Error types and result aliases
//! - [`report`] - Outcome collection and formatting
//! - [`runtime`] - Access to interpreter state (snapshots and live probes)
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use healthcheck::check::{CheckContext, CheckRegistry, CheckRunner, Severity};
//! use healthcheck::runtime::{Snapshot, SnapshotRuntime};
//!
//! let mut snapshot = Snapshot::default();
//! snapshot.php_version = "8.2.10".into();
//! snapshot.settings.insert("memory_limit".into(), "16M".into());
//!
//! let registry = CheckRegistry::with_builtins().unwrap();
//! let mut runtime = SnapshotRuntime::new(snapshot);
//! let report = CheckRunner::new(&registry, CheckContext::default()).run(&mut runtime);
//!
//! assert!(report.has_failures(Severity::Recommendation));
//! ```

pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod runtime;
pub mod ui;

pub use error::{HealthCheckError, Result};
