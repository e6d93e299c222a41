//! Configuration document schema.
//!
//! These structs map one-to-one onto a profile YAML file:
//!
//! ```yaml
//! inherits:
//!   - ../base.yaml
//! env_vars:
//!   - name: GITHUB_TOKEN
//!     description: Token used by gh and git
//!     store_in: ~/.zshrc
//! steps:
//!   - brewfile: Brewfile
//!     description: Core tools
//!   - script: scripts/node.sh
//!     completion_check: command -v node
//! ```

use serde::{Deserialize, Serialize};

/// A single configuration document, before inheritance is resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigDocument {
    /// Documents to inherit from, relative to this document's directory.
    pub inherits: Vec<String>,

    /// Environment variables required by this profile.
    pub env_vars: Vec<EnvVarDecl>,

    /// Setup steps, in execution order.
    pub steps: Vec<StepDecl>,
}

/// Declaration of an environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvVarDecl {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// File to persist `export NAME="value"` into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_in: Option<String>,

    /// Fixed value; when absent the value is asked for at apply time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Declaration of a setup step.
///
/// Exactly one of `brewfile` or `script` must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StepDecl {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brewfile: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Script path or command that exits zero once the step is satisfied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_check: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_document() {
        let yaml = r#"
inherits:
  - ../base.yaml
env_vars:
  - name: GITHUB_TOKEN
    description: Token for gh
    store_in: ~/.zshrc
steps:
  - brewfile: Brewfile
    description: Core tools
  - script: echo hi
    completion_check: command -v node
"#;
        let doc: ConfigDocument = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(doc.inherits, vec!["../base.yaml"]);
        assert_eq!(doc.env_vars[0].name, "GITHUB_TOKEN");
        assert_eq!(doc.env_vars[0].store_in.as_deref(), Some("~/.zshrc"));
        assert_eq!(doc.steps[0].brewfile.as_deref(), Some("Brewfile"));
        assert_eq!(doc.steps[1].script.as_deref(), Some("echo hi"));
        assert_eq!(
            doc.steps[1].completion_check.as_deref(),
            Some("command -v node")
        );
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let doc: ConfigDocument = serde_yaml::from_str("steps: []").unwrap();
        assert!(doc.inherits.is_empty());
        assert!(doc.env_vars.is_empty());
    }

    #[test]
    fn env_var_description_is_optional() {
        let doc: ConfigDocument = serde_yaml::from_str("env_vars:\n  - name: EDITOR\n").unwrap();
        assert_eq!(doc.env_vars[0].description, "");
        assert!(doc.env_vars[0].store_in.is_none());
    }

    #[test]
    fn unknown_step_keys_are_rejected() {
        let result: Result<ConfigDocument, _> = serde_yaml::from_str("steps:\n  - npm: install\n");
        assert!(result.is_err());
    }

    #[test]
    fn env_var_without_name_is_rejected() {
        let result: Result<ConfigDocument, _> =
            serde_yaml::from_str("env_vars:\n  - description: nameless\n");
        assert!(result.is_err());
    }
}
