//! User interface.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for terminal usage
//! - [`MockUI`] for capturing output in tests
//!
//! # Example
//!
//! ```
//! use healthcheck::ui::{MockUI, OutputMode, UserInterface};
//!
//! let mut ui = MockUI::with_mode(OutputMode::Quiet);
//! ui.show_header("healthcheck");
//! ui.success("All conditions passed");
//! assert!(ui.headers().is_empty());
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, HealthTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a status message.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message. Shown in every mode.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every mode.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Write command output verbatim (reports, listings, snapshots).
    ///
    /// Machine-readable output must not be dropped by quiet modes, so this
    /// is shown in every mode.
    fn output(&mut self, text: &str);

    /// Whether colors are enabled.
    fn use_color(&self) -> bool;
}
