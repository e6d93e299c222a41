//! Environment variable declarations.

use std::path::Path;

use crate::config::schema::EnvVarDecl;
use crate::error::{Result, SetMeUpError};
use crate::plan::PlanEnvVar;

/// A named value to set in the process environment, optionally persisted
/// to a shell profile.
///
/// Two variables are the same variable when their names match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentVariable {
    pub name: String,
    pub description: String,
    pub store_in: Option<String>,
    pub value: Option<String>,
}

impl EnvironmentVariable {
    /// Create a variable with no stored file and no fixed value.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            store_in: None,
            value: None,
        }
    }

    /// Project into the plan record.
    pub fn to_plan_format(&self) -> PlanEnvVar {
        PlanEnvVar {
            name: self.name.clone(),
            description: self.description.clone(),
            store_in: self.store_in.clone(),
            value: self.value.clone(),
        }
    }

    /// Build from a declaration in the document at `doc_path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the name can't be set in a process
    /// environment.
    pub fn from_decl(decl: &EnvVarDecl, doc_path: &Path) -> Result<Self> {
        if let Some(reason) = invalid_name_reason(&decl.name) {
            return Err(SetMeUpError::ConfigurationError {
                path: doc_path.to_path_buf(),
                message: format!("invalid environment variable name {:?}: {}", decl.name, reason),
            });
        }

        Ok(Self {
            name: decl.name.clone(),
            description: decl.description.clone(),
            store_in: decl.store_in.clone(),
            value: decl.value.clone(),
        })
    }
}

/// Why `name` can't be used as an environment variable name, if it can't.
pub fn invalid_name_reason(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("name is empty")
    } else if name.contains('=') {
        Some("name contains '='")
    } else if name.contains('\0') {
        Some("name contains a NUL byte")
    } else {
        None
    }
}

/// Merge `overlay` into `base` by name.
///
/// A variable whose name is already present replaces the earlier one in
/// place; new names are appended.
pub fn merge_env_vars<I>(base: &mut Vec<EnvironmentVariable>, overlay: I)
where
    I: IntoIterator<Item = EnvironmentVariable>,
{
    for var in overlay {
        match base.iter_mut().find(|existing| existing.name == var.name) {
            Some(existing) => *existing = var,
            None => base.push(var),
        }
    }
}
