//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::report::OutputFormat;
use crate::runtime::ServerFamily;

/// healthcheck - Diagnose PHP runtime configuration problems for web applications.
#[derive(Debug, Parser)]
#[command(name = "healthcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default healthcheck.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output, including passing checks
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the health checks (default if no command specified)
    Run(RunArgs),

    /// List registered checks
    List(ListArgs),

    /// Capture a snapshot from a PHP binary
    Probe(ProbeArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Evaluate a saved snapshot (YAML or JSON) instead of probing PHP
    #[arg(short, long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// PHP binary to probe
    #[arg(long, value_name = "PATH", env = "HEALTHCHECK_PHP")]
    pub php: Option<String>,

    /// Server family hosting PHP
    ///
    /// A live probe runs PHP's command-line SAPI and cannot list Apache
    /// modules, so `apache` needs a snapshot captured under Apache for the
    /// mod-rewrite and mod-security checks to report real findings.
    #[arg(long, value_enum)]
    pub server: Option<ServerFamily>,

    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Fail the run on failed recommendations too
    #[arg(long)]
    pub strict: bool,

    /// Run only specified checks (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Skip specified checks (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `probe` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ProbeArgs {
    /// PHP binary to probe
    #[arg(long, value_name = "PATH", env = "HEALTHCHECK_PHP")]
    pub php: Option<String>,

    /// Output as JSON instead of YAML
    #[arg(long)]
    pub json: bool,

    /// Write the snapshot to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_defaults_to_none() {
        let cli = Cli::parse_from(["healthcheck"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_run_args() {
        let cli = Cli::parse_from([
            "healthcheck",
            "run",
            "--snapshot",
            "env.yml",
            "--server",
            "apache",
            "--format",
            "json",
            "--strict",
            "--only",
            "memory-limit,upload-size",
            "--skip",
            "mod-security",
        ]);
        match cli.command {
            Some(Commands::Run(args)) => {
                assert_eq!(args.snapshot, Some(PathBuf::from("env.yml")));
                assert_eq!(args.server, Some(ServerFamily::Apache));
                assert_eq!(args.format, Some(OutputFormat::Json));
                assert!(args.strict);
                assert_eq!(args.only, vec!["memory-limit", "upload-size"]);
                assert_eq!(args.skip, vec!["mod-security"]);
            }
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["healthcheck", "list", "--quiet", "--no-color"]);
        assert!(cli.quiet);
        assert!(cli.no_color);
        assert!(matches!(cli.command, Some(Commands::List(_))));
    }

    #[test]
    fn parses_probe_args() {
        let cli = Cli::parse_from(["healthcheck", "probe", "--php", "php8.2", "--json"]);
        match cli.command {
            Some(Commands::Probe(args)) => {
                assert_eq!(args.php.as_deref(), Some("php8.2"));
                assert!(args.json);
            }
            other => panic!("expected probe, got {:?}", other),
        }
    }
}
