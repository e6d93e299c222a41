//! The `setmeup apply` command.

use console::style;

use crate::apply::{
    ApplyEngine, ApplyEvent, ApplyReport, ApplyState, EnvValueProvider, PromptValueProvider,
    ValueProvider,
};
use crate::cli::args::ApplyArgs;
use crate::error::{Result, SetMeUpError};
use crate::plan::{Plan, PlanEnvVar, PlanStore};
use crate::settings::Settings;
use crate::shell::is_interactive;

use super::dispatcher::{Command, CommandResult};

/// The apply command implementation.
pub struct ApplyCommand {
    args: ApplyArgs,
    settings: Settings,
}

impl ApplyCommand {
    pub fn new(args: ApplyArgs, settings: Settings) -> Self {
        Self { args, settings }
    }
}

impl Command for ApplyCommand {
    fn execute(&self) -> Result<CommandResult> {
        let mut store = PlanStore::new();
        let mut plan = store.load(&self.args.plan)?;
        run_apply(&mut store, &mut plan, &self.settings)
    }
}

/// Apply `plan` and print a summary. Shared with `plan --apply`.
///
/// Values come from `SETMEUP_VALUE_<NAME>` first; when none is set and a
/// terminal is attached the user is prompted.
pub(crate) fn run_apply(
    store: &mut PlanStore,
    plan: &mut Plan,
    settings: &Settings,
) -> Result<CommandResult> {
    let mut env_values = EnvValueProvider::from_env();
    let mut prompt = is_interactive().then(PromptValueProvider::new);
    let mut provider = |var: &PlanEnvVar| -> Result<String> {
        match (env_values.provide(var), prompt.as_mut()) {
            (Err(SetMeUpError::MissingValue { .. }), Some(prompt)) => prompt.provide(var),
            (result, _) => result,
        }
    };

    let report = ApplyEngine::new(settings, store, &mut provider).apply(plan)?;

    println!("{}", summarize(&report));

    if report.is_success() {
        Ok(CommandResult::success())
    } else {
        Ok(CommandResult::failure(1))
    }
}

/// One-paragraph outcome of an apply, styled for the terminal.
fn summarize(report: &ApplyReport) -> String {
    let problems: Vec<String> = report
        .events
        .iter()
        .filter(|e| e.is_error() || e.is_warning())
        .map(|e| {
            if e.is_error() {
                format!("  {} {}", style("✗").red(), e)
            } else {
                format!("  {} {}", style("!").yellow(), e)
            }
        })
        .collect();

    let saved = report.events.iter().find_map(|e| match e {
        ApplyEvent::PlanSaved { path } => Some(path),
        _ => None,
    });

    let headline = match report.state {
        ApplyState::Done => format!(
            "{} Apply finished: {} step(s) executed",
            style("✓").green(),
            report.executed_steps().len()
        ),
        ApplyState::Halted => format!("{} Apply halted on a failing step", style("✗").red()),
        ApplyState::Aborted => format!(
            "{} Apply aborted: {} step(s) changed since the plan was generated",
            style("✗").red(),
            report.mismatched_steps().len()
        ),
    };

    let mut lines = vec![headline];
    lines.extend(problems);
    if let Some(path) = saved {
        lines.push(format!("  Progress saved to {}", path.display()));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report(state: ApplyState, events: Vec<ApplyEvent>) -> ApplyReport {
        ApplyReport { state, events }
    }

    #[test]
    fn summary_of_done_counts_executed_steps() {
        let text = summarize(&report(
            ApplyState::Done,
            vec![
                ApplyEvent::StepStarted {
                    step: "one".to_string(),
                },
                ApplyEvent::StepVerified {
                    step: "one".to_string(),
                },
                ApplyEvent::PlanSaved {
                    path: PathBuf::from("plan.yaml"),
                },
            ],
        ));

        assert!(text.contains("1 step(s) executed"));
        assert!(text.contains("Progress saved to plan.yaml"));
    }

    #[test]
    fn summary_of_abort_lists_mismatches() {
        let text = summarize(&report(
            ApplyState::Aborted,
            vec![ApplyEvent::ChecksumMismatch {
                step: "Install Brew Bundle".to_string(),
                expected: "aaa".to_string(),
                actual: "bbb".to_string(),
            }],
        ));

        assert!(text.contains("aborted"));
        assert!(text.contains("Install Brew Bundle"));
        assert!(!text.contains("Progress saved"));
    }

    #[test]
    fn summary_of_halt_names_failed_step() {
        let text = summarize(&report(
            ApplyState::Halted,
            vec![ApplyEvent::StepFailed {
                step: "Execute Script false".to_string(),
                code: Some(1),
            }],
        ));

        assert!(text.contains("halted"));
        assert!(text.contains("Execute Script false"));
    }
}
