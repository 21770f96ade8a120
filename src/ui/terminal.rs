//! Terminal UI.

use std::io::Write;

use console::Term;

use super::{should_use_colors, HealthTheme, OutputMode, UserInterface};

/// Terminal UI implementation.
///
/// Status goes to stdout; warnings and errors go to stderr so they never
/// mix with machine-readable output.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: HealthTheme,
    use_color: bool,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI, colored when stdout supports it.
    pub fn new(mode: OutputMode) -> Self {
        Self::with_color(mode, should_use_colors())
    }

    /// Create a new terminal UI with explicit color choice.
    pub fn with_color(mode: OutputMode, use_color: bool) -> Self {
        let theme = if use_color {
            HealthTheme::new()
        } else {
            HealthTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            use_color,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn output(&mut self, text: &str) {
        write!(self.out, "{}", text).ok();
        self.out.flush().ok();
    }

    fn use_color(&self) -> bool {
        self.use_color
    }
}

/// Create the terminal UI for the given mode, honoring `--no-color`.
pub fn create_ui(mode: OutputMode, no_color: bool) -> Box<dyn UserInterface> {
    if no_color {
        Box::new(TerminalUI::with_color(mode, false))
    } else {
        Box::new(TerminalUI::new(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_keeps_mode() {
        let ui = TerminalUI::with_color(OutputMode::Quiet, false);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
        assert!(!ui.use_color());
    }

    #[test]
    fn no_color_disables_color() {
        let ui = create_ui(OutputMode::Normal, true);
        assert!(!ui.use_color());
    }
}
