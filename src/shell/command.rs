//! Shell command execution.

use crate::error::{Result, SetMeUpError};
use crate::settings::Settings;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard error, captured only for quiet commands.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Discard stdout and capture stderr instead of inheriting both.
    pub quiet: bool,
}

impl CommandOptions {
    /// Options for checks whose output the user shouldn't see.
    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

/// Execute a command line through `<shell> -c`.
///
/// A non-zero exit is returned as an unsuccessful [`CommandResult`]; only a
/// failure to start the shell is an error.
pub fn execute(command: &str, settings: &Settings, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(&settings.shell);
    cmd.arg("-c");
    cmd.arg(command);
    cmd.stdin(Stdio::inherit());

    if options.quiet {
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());
    }

    tracing::debug!("Running `{}` via {}", command, settings.shell);

    let output = cmd.output().map_err(|_| SetMeUpError::CommandFailed {
        command: command.to_string(),
        code: None,
    })?;

    Ok(CommandResult {
        exit_code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        duration: start.elapsed(),
        success: output.status.success(),
    })
}

/// Execute a command quietly and report whether it exited with zero.
pub fn execute_check(command: &str, settings: &Settings) -> bool {
    match execute(command, settings, &CommandOptions::quiet()) {
        Ok(result) if result.success => true,
        Ok(result) => {
            tracing::debug!(
                "Check `{}` exited with {:?}: {}",
                command,
                result.exit_code,
                result.stderr.trim()
            );
            false
        }
        Err(e) => {
            tracing::debug!("Check `{}` could not run: {}", command, e);
            false
        }
    }
}
