//! The `setmeup plan` command.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;

use crate::cli::args::PlanArgs;
use crate::config::ConfigResolver;
use crate::error::{Result, SetMeUpError};
use crate::plan::{compile, PlanStore};
use crate::settings::Settings;
use crate::shell::is_interactive;

use super::apply::run_apply;
use super::dispatcher::{Command, CommandResult};

/// The plan command implementation.
pub struct PlanCommand {
    args: PlanArgs,
    settings: Settings,
}

impl PlanCommand {
    pub fn new(args: PlanArgs, settings: Settings) -> Self {
        Self { args, settings }
    }

    fn confirm_apply(&self) -> Result<bool> {
        if self.args.apply {
            return Ok(true);
        }
        if !is_interactive() {
            return Ok(false);
        }
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Do you want to apply the plan now?")
            .default(false)
            .interact_on(&Term::stderr())
            .map_err(|e| SetMeUpError::Io(e.into()))
    }
}

impl Command for PlanCommand {
    fn execute(&self) -> Result<CommandResult> {
        let resolved = ConfigResolver::new().resolve(&self.args.config)?;
        let mut plan = compile(&resolved, &self.settings);

        println!("{}", plan.visualize());

        let mut store = PlanStore::new();
        let path = store.save(&mut plan, &self.args.plan)?;
        println!("{} Plan written to {}", style("✓").green(), path.display());

        if self.confirm_apply()? {
            run_apply(&mut store, &mut plan, &self.settings)
        } else {
            Ok(CommandResult::success())
        }
    }
}
