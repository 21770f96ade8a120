//! Run command implementation.
//!
//! The `healthcheck run` command evaluates every selected check against a
//! snapshot (from a file or a live probe) and reports the outcomes.

use std::path::{Path, PathBuf};

use crate::check::{CheckContext, CheckRegistry, CheckRunner, Selection};
use crate::cli::args::RunArgs;
use crate::config::{load_config, HealthCheckConfig};
use crate::error::Result;
use crate::report::{HumanFormatter, JsonFormatter, OutputFormat, Report, ReportFormatter};
use crate::runtime::{PhpProbe, ServerFamily, Snapshot, SnapshotRuntime};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, EXIT_UNHEALTHY};

const APACHE_PROBE_WARNING: &str = "A command-line probe cannot see Apache modules; \
                                    mod-rewrite and mod-security need a snapshot captured \
                                    under Apache (see `healthcheck probe`)";

/// Run settings after layering flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub php: String,
    pub server: Option<ServerFamily>,
    pub format: OutputFormat,
    pub strict: bool,
    pub selection: Selection,
}

impl RunSettings {
    /// Layer command-line flags over a loaded config.
    ///
    /// `--only` replaces the configured list; `--skip` adds to it.
    pub fn resolve(config: &HealthCheckConfig, args: &RunArgs) -> Self {
        let only = if args.only.is_empty() {
            config.only.clone()
        } else {
            args.only.clone()
        };
        let skip = config.skip.iter().chain(args.skip.iter()).cloned();

        Self {
            php: args
                .php
                .clone()
                .unwrap_or_else(|| config.php_binary().to_string()),
            server: args.server.or(config.server),
            format: args.format.or(config.format).unwrap_or_default(),
            strict: args.strict || config.strict,
            selection: Selection::new(only, skip),
        }
    }
}

/// The run command implementation.
pub struct RunCommand {
    working_dir: PathBuf,
    config_path: Option<PathBuf>,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(working_dir: &Path, config_path: Option<&Path>, args: RunArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    fn snapshot(&self, settings: &RunSettings, ui: &mut dyn UserInterface) -> Result<Snapshot> {
        if let Some(ref path) = self.args.snapshot {
            tracing::debug!("Loading snapshot from {}", path.display());
            return Snapshot::load(path);
        }

        if settings.format == OutputFormat::Human {
            ui.message(&format!("Probing {}...", settings.php));
        }
        // `php -r` runs under the CLI SAPI, which cannot list Apache modules.
        if settings.server == Some(ServerFamily::Apache) {
            ui.warning(APACHE_PROBE_WARNING);
        }
        PhpProbe::new(&settings.php).capture()
    }

    /// Evaluate the selected checks, returning the report and settings used.
    pub fn evaluate(&self, ui: &mut dyn UserInterface) -> Result<(Report, RunSettings)> {
        let config = load_config(&self.working_dir, self.config_path.as_deref())?;
        let settings = RunSettings::resolve(&config, &self.args);

        let registry = CheckRegistry::with_builtin_options(&config.builtin_options())?;
        settings.selection.validate(&registry)?;

        let snapshot = self.snapshot(&settings, ui)?;
        let server = settings.server.unwrap_or(snapshot.server);

        if settings.format == OutputFormat::Human {
            ui.show_header(&format!("PHP {} ({})", snapshot.php_version, server));
        }

        let mut runtime = SnapshotRuntime::new(snapshot);
        let runner = CheckRunner::new(&registry, CheckContext::new(server))
            .with_selection(settings.selection.clone());
        let report = runner.run(&mut runtime);

        Ok((report, settings))
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (report, settings) = self.evaluate(ui)?;

        let mut rendered = Vec::new();
        match settings.format {
            OutputFormat::Json => JsonFormatter::new().format(&report, &mut rendered)?,
            OutputFormat::Human => {
                HumanFormatter::new(ui.use_color(), ui.output_mode().shows_passes())
                    .format(&report, &mut rendered)?
            }
        }
        ui.output(&String::from_utf8_lossy(&rendered));

        if report.is_healthy(settings.strict) {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(EXIT_UNHEALTHY))
        }
    }
}
