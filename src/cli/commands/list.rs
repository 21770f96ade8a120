//! List command implementation.
//!
//! The `healthcheck list` command lists registered checks.

use anyhow::Context;

use crate::check::CheckRegistry;
use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::ui::theme::HealthTheme;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(args: ListArgs) -> Self {
        Self { args }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = CheckRegistry::with_builtins()?;
        let descriptors = registry.descriptors();

        if self.args.json {
            let json = serde_json::to_string_pretty(&descriptors)
                .context("Failed to serialize check list")?;
            ui.output(&format!("{}\n", json));
            return Ok(CommandResult::success());
        }

        let theme = if ui.use_color() {
            HealthTheme::new()
        } else {
            HealthTheme::plain()
        };
        let width = descriptors
            .iter()
            .map(|d| d.id.as_str().len())
            .max()
            .unwrap_or(0);

        ui.show_header("Checks");
        let mut listing = String::new();
        for descriptor in &descriptors {
            let id = format!("{:<width$}", descriptor.id.as_str(), width = width);
            let severity = format!("{:<14}", descriptor.severity.to_string());
            listing.push_str(&format!(
                "  {} {} {}\n",
                theme.highlight.apply_to(id),
                theme.dim.apply_to(severity),
                descriptor.description
            ));
        }
        ui.output(&listing);

        Ok(CommandResult::success())
    }
}
