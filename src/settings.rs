//! Runtime settings.
//!
//! Settings control which programs SetMeUp shells out to. Defaults match a
//! macOS workstation with Homebrew; each can be overridden through an
//! environment variable.

/// Default location of the plan file.
pub const DEFAULT_PLAN_FILE_NAME: &str = "setmeup_plan.yaml";

/// Shell used to run plan command lines.
pub const SHELL_ENV: &str = "SETMEUP_SHELL";

/// Interpreter prefixed to script files.
pub const SCRIPT_INTERPRETER_ENV: &str = "SETMEUP_SCRIPT_INTERPRETER";

/// Program used for bundle install and check.
pub const BUNDLE_TOOL_ENV: &str = "SETMEUP_BUNDLE_TOOL";

/// Runtime settings shared by the plan compiler and apply engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Shell invoked as `<shell> -c <command>`.
    pub shell: String,

    /// Interpreter used for script files (`<interpreter> <path>`).
    pub script_interpreter: String,

    /// Bundle tool (`<tool> bundle --file <manifest>`).
    pub bundle_tool: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shell: "/bin/sh".to_string(),
            script_interpreter: "/bin/bash".to_string(),
            bundle_tool: "brew".to_string(),
        }
    }
}

impl Settings {
    /// Build settings from defaults overridden by `SETMEUP_*` variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let pick = |key: &str, default: String| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(default)
        };

        Self {
            shell: pick(SHELL_ENV, defaults.shell),
            script_interpreter: pick(SCRIPT_INTERPRETER_ENV, defaults.script_interpreter),
            bundle_tool: pick(BUNDLE_TOOL_ENV, defaults.bundle_tool),
        }
    }
}
