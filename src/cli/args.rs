//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::settings::DEFAULT_PLAN_FILE_NAME;

/// SetMeUp - compile machine setup profiles into plans and apply them.
#[derive(Debug, Parser)]
#[command(name = "setmeup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compile a configuration into an execution plan
    Plan(PlanArgs),

    /// Apply a previously generated plan
    Apply(ApplyArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `plan` command.
#[derive(Debug, Clone, Args)]
pub struct PlanArgs {
    /// Configuration file to compile
    pub config: PathBuf,

    /// Where to write the plan
    #[arg(short, long, default_value = DEFAULT_PLAN_FILE_NAME)]
    pub plan: PathBuf,

    /// Apply the plan right after writing it, without asking
    #[arg(long)]
    pub apply: bool,
}

/// Arguments for the `apply` command.
#[derive(Debug, Clone, Args)]
pub struct ApplyArgs {
    /// Plan file to apply
    #[arg(short, long, default_value = DEFAULT_PLAN_FILE_NAME)]
    pub plan: PathBuf,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
