//! Configuration loading.
//!
//! Configuration is optional. `healthcheck.yml` in the working directory
//! (or the file named by `--config`) supplies defaults for the `run`
//! command; command-line flags override it.
//!
//! # Example
//!
//! ```
//! use healthcheck::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("healthcheck.yml"), "php: php8.2").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.php_binary(), "php8.2");
//! ```

pub mod loader;
pub mod schema;

pub use loader::{
    default_config_path, load_config, load_config_file, parse_config, DEFAULT_CONFIG_FILE,
};
pub use schema::{HealthCheckConfig, DEFAULT_PHP_BINARY};
