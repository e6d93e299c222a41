//! Command dispatching.
//!
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use clap::CommandFactory;

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::settings::Settings;

use super::{ApplyCommand, CompletionsCommand, PlanCommand};

/// Trait for command implementations.
pub trait Command {
    fn execute(&self) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    settings: Settings,
}

impl CommandDispatcher {
    /// Create a dispatcher with settings read from the environment.
    pub fn new() -> Self {
        Self::with_settings(Settings::from_env())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Route the CLI subcommand to its implementation and run it.
    ///
    /// With no subcommand the help text is printed.
    pub fn dispatch(&self, cli: &Cli) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Plan(args)) => {
                PlanCommand::new(args.clone(), self.settings.clone()).execute()
            }
            Some(Commands::Apply(args)) => {
                ApplyCommand::new(args.clone(), self.settings.clone()).execute()
            }
            Some(Commands::Completions(args)) => CompletionsCommand::new(args.clone()).execute(),
            None => {
                Cli::command().print_help()?;
                println!();
                Ok(CommandResult::success())
            }
        }
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
