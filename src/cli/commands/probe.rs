//! Probe command implementation.
//!
//! The `healthcheck probe` command captures a snapshot from a PHP binary,
//! suitable for `healthcheck run --snapshot`.

use std::path::{Path, PathBuf};

use crate::cli::args::ProbeArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::runtime::{PhpProbe, Snapshot};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The probe command implementation.
pub struct ProbeCommand {
    working_dir: PathBuf,
    config_path: Option<PathBuf>,
    args: ProbeArgs,
}

impl ProbeCommand {
    /// Create a new probe command.
    pub fn new(working_dir: &Path, config_path: Option<&Path>, args: ProbeArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Render a snapshot in the requested format.
    pub fn render(&self, snapshot: &Snapshot) -> Result<String> {
        if self.args.json {
            Ok(format!("{}\n", snapshot.to_json()?))
        } else {
            snapshot.to_yaml()
        }
    }
}

impl Command for ProbeCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let php = match self.args.php {
            Some(ref php) => php.clone(),
            None => {
                let config = load_config(&self.working_dir, self.config_path.as_deref())?;
                config.php_binary().to_string()
            }
        };

        let snapshot = PhpProbe::new(&php).capture()?;
        let rendered = self.render(&snapshot)?;

        match self.args.output {
            Some(ref path) => {
                std::fs::write(path, rendered)?;
                ui.success(&format!(
                    "Wrote snapshot of PHP {} to {}",
                    snapshot.php_version,
                    path.display()
                ));
            }
            None => ui.output(&rendered),
        }

        Ok(CommandResult::success())
    }
}
