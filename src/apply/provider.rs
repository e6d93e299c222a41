//! Sources of values for required environment variables.

use std::collections::HashMap;

use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use crate::error::{Result, SetMeUpError};
use crate::plan::PlanEnvVar;

/// Prefix of variables that supply values non-interactively.
pub const VALUE_ENV_PREFIX: &str = "SETMEUP_VALUE_";

/// Supplies a value for a variable that is not yet set.
pub trait ValueProvider {
    fn provide(&mut self, var: &PlanEnvVar) -> Result<String>;
}

impl<F> ValueProvider for F
where
    F: FnMut(&PlanEnvVar) -> Result<String>,
{
    fn provide(&mut self, var: &PlanEnvVar) -> Result<String> {
        self(var)
    }
}

/// Reads values from `SETMEUP_VALUE_<NAME>` variables.
#[derive(Debug, Default)]
pub struct EnvValueProvider {
    overrides: HashMap<String, String>,
}

impl EnvValueProvider {
    /// Collect `SETMEUP_VALUE_*` from the process environment.
    pub fn from_env() -> Self {
        let overrides = std::env::vars()
            .filter_map(|(k, v)| {
                k.strip_prefix(VALUE_ENV_PREFIX)
                    .map(|name| (name.to_string(), v))
            })
            .collect();
        Self { overrides }
    }

    /// Create with explicit values keyed by variable name (for testing).
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }
}

impl ValueProvider for EnvValueProvider {
    fn provide(&mut self, var: &PlanEnvVar) -> Result<String> {
        self.overrides
            .get(&var.name)
            .cloned()
            .ok_or_else(|| SetMeUpError::MissingValue {
                name: var.name.clone(),
            })
    }
}

/// Asks for values on the terminal.
pub struct PromptValueProvider {
    term: Term,
}

impl PromptValueProvider {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Default for PromptValueProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueProvider for PromptValueProvider {
    fn provide(&mut self, var: &PlanEnvVar) -> Result<String> {
        let question = if var.description.is_empty() {
            format!("Enter {}", var.name)
        } else {
            format!("Enter {} ({})", var.name, var.description)
        };

        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .interact_on(&self.term)
            .map_err(|e| SetMeUpError::Io(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> PlanEnvVar {
        PlanEnvVar {
            name: name.to_string(),
            description: String::new(),
            store_in: None,
            value: None,
        }
    }

    #[test]
    fn closures_are_providers() {
        let mut asked = Vec::new();
        let mut provider = |v: &PlanEnvVar| -> Result<String> {
            asked.push(v.name.clone());
            Ok("secret".to_string())
        };

        assert_eq!(provider.provide(&var("TOKEN")).unwrap(), "secret");
        drop(provider);
        assert_eq!(asked, ["TOKEN"]);
    }

    #[test]
    fn env_provider_returns_override() {
        let overrides: HashMap<String, String> = [("TOKEN".to_string(), "abc".to_string())].into();
        let mut provider = EnvValueProvider::with_overrides(overrides);

        assert_eq!(provider.provide(&var("TOKEN")).unwrap(), "abc");
    }

    #[test]
    fn env_provider_reports_missing_value() {
        let mut provider = EnvValueProvider::default();
        let result = provider.provide(&var("TOKEN"));
        assert!(matches!(result, Err(SetMeUpError::MissingValue { .. })));
    }
}
