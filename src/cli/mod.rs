//! Command-line interface for SetMeUp.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{ApplyArgs, Cli, Commands, CompletionsArgs, PlanArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
