//! Output mode.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show passing outcomes too.
    Verbose,
    /// Show failures, headers and status.
    #[default]
    Normal,
    /// Show failures and the summary only.
    Quiet,
}

impl OutputMode {
    /// Pick a mode from the global `--verbose` / `--quiet` flags.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (true, _) => Self::Verbose,
            (false, true) => Self::Quiet,
            _ => Self::Normal,
        }
    }

    /// Check if this mode lists passing outcomes.
    pub fn shows_passes(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows headers and status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}
