//! Human-readable plan rendering.

use std::fmt::Write;

use crate::plan::Plan;

impl Plan {
    /// Render the plan as the text shown after `setmeup plan`.
    pub fn visualize(&self) -> String {
        let mut out = String::new();
        out.push_str("# Execution Plan\n\n");

        out.push_str("## Environment variables\n");
        if self.required_env_vars.is_empty() {
            out.push_str("(none)\n");
        }
        for var in &self.required_env_vars {
            let _ = write!(out, "- {}", var.name);
            if !var.description.is_empty() {
                let _ = write!(out, ": {}", var.description);
            }
            if let Some(store_in) = &var.store_in {
                let _ = write!(out, " -> {}", store_in);
            }
            out.push('\n');
        }

        let _ = writeln!(
            out,
            "\n## Steps ({} to run, {} already satisfied)",
            self.steps.len() - self.skipped_count(),
            self.skipped_count()
        );
        if self.steps.is_empty() {
            out.push_str("(none)\n");
        }
        for (index, step) in self.steps.iter().enumerate() {
            if step.skip {
                let _ = writeln!(out, "{}. SKIP {} (already satisfied)", index + 1, step.name);
            } else {
                let _ = writeln!(out, "{}. RUN  {}: {}", index + 1, step.name, step.execute);
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use crate::checksum::ChecksumKind;
    use crate::plan::{Plan, PlanChecksum, PlanEnvVar, PlanStep};

    fn step(name: &str, execute: &str, skip: bool) -> PlanStep {
        PlanStep::new(
            name.to_string(),
            None,
            PlanChecksum {
                value: "x".to_string(),
                origin: execute.to_string(),
                kind: ChecksumKind::String,
            },
            execute.to_string(),
            None,
            skip,
        )
    }

    #[test]
    fn lists_env_vars_and_steps() {
        let plan = Plan::new(
            vec![PlanEnvVar {
                name: "GITHUB_TOKEN".to_string(),
                description: "token for gh".to_string(),
                store_in: Some("~/.zshrc".to_string()),
                value: None,
            }],
            vec![
                step("Install Brew Bundle", "brew bundle --file Brewfile --no-lock", true),
                step("Execute Script echo hi", "echo hi", false),
            ],
        );

        let text = plan.visualize();

        assert!(text.starts_with("# Execution Plan"));
        assert!(text.contains("- GITHUB_TOKEN: token for gh -> ~/.zshrc"));
        assert!(text.contains("1 to run, 1 already satisfied"));
        assert!(text.contains("1. SKIP Install Brew Bundle (already satisfied)"));
        assert!(text.contains("2. RUN  Execute Script echo hi: echo hi"));
    }

    #[test]
    fn empty_plan_says_none() {
        let text = Plan::new(Vec::new(), Vec::new()).visualize();
        assert_eq!(text.matches("(none)").count(), 2);
    }
}
