//! Access to the PHP runtime being diagnosed.
//!
//! Checks never read process state directly. They go through the
//! [`Runtime`] trait, which has two implementations:
//!
//! - [`SnapshotRuntime`] - an in-memory runtime backed by a [`Snapshot`]
//! - [`PhpProbe`] - captures a [`Snapshot`] from a real PHP binary
//!
//! # Example
//!
//! ```
//! use healthcheck::runtime::{Runtime, Snapshot, SnapshotRuntime};
//!
//! let mut snapshot = Snapshot::default();
//! snapshot.settings.insert("memory_limit".into(), "128M".into());
//!
//! let runtime = SnapshotRuntime::new(snapshot);
//! assert_eq!(runtime.setting("memory_limit").unwrap().as_deref(), Some("128M"));
//! ```

pub mod php;
pub mod size;
pub mod snapshot;
pub mod version;

pub use php::PhpProbe;
pub use size::{format_megabytes, parse_size, MEGABYTE};
pub use snapshot::{ServerFamily, Snapshot, SnapshotRuntime};
pub use version::compare_versions;

use crate::error::Result;

/// Read and (where allowed) write access to interpreter state.
///
/// Every probe returns a `Result` so that an introspection failure can be
/// told apart from a failing condition.
pub trait Runtime {
    /// Interpreter version string (e.g. `8.2.10`).
    fn version(&self) -> Result<String>;

    /// Current value of an ini setting, `None` when unset.
    fn setting(&self, name: &str) -> Result<Option<String>>;

    /// Attempt to change an ini setting at run time; `None` unsets it.
    ///
    /// Like a suppressed `ini_set`, a refused change is not an error. Callers
    /// detect it by reading the setting back.
    fn set_setting(&mut self, name: &str, value: Option<&str>) -> Result<()>;

    /// Whether a function is available to scripts.
    fn has_function(&self, name: &str) -> Result<bool>;

    /// Whether a web server module is loaded.
    fn module_loaded(&self, name: &str) -> Result<bool>;

    /// Current `ignore_user_abort` flag.
    fn ignore_user_abort(&self) -> Result<bool>;

    /// Attempt to change the `ignore_user_abort` flag.
    fn set_ignore_user_abort(&mut self, value: bool) -> Result<()>;

    /// Attempt to change the script execution time limit, in seconds.
    fn set_time_limit(&mut self, seconds: u64) -> Result<()>;

    /// Whether Unicode-aware pattern matching (`/^\pL/u`) works.
    fn unicode_regex_supported(&self) -> Result<bool>;

    /// Dotted libxml2 version, `None` when the XML extension is absent.
    fn libxml_version(&self) -> Result<Option<String>>;
}
