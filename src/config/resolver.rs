//! Recursive `inherits:` resolution.
//!
//! A profile may inherit from any number of other profiles. Resolution is
//! depth-first: every inherited document is fully resolved (including its own
//! inheritance) before being merged into the inheriting one.
//!
//! # Merge Rules
//!
//! - Steps are concatenated: inherited steps in declaration order, then local steps
//! - Environment variables are merged by name; later declarations replace
//!   earlier ones, and local declarations replace inherited ones
//! - Inherited paths are relative to the inheriting document's directory

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::env_var::{merge_env_vars, EnvironmentVariable};
use crate::config::loader::load_document;
use crate::config::step::SetupStep;
use crate::error::{Result, SetMeUpError};

/// A configuration with all inheritance flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfiguration {
    /// Path of the root document.
    pub path: PathBuf,

    /// Documents the root inherits from directly, resolved to paths.
    pub inherits_paths: Vec<PathBuf>,

    /// Required variables, unique by name.
    pub env_vars: Vec<EnvironmentVariable>,

    /// Steps in execution order.
    pub steps: Vec<SetupStep>,
}

/// Resolves a profile and everything it inherits.
#[derive(Debug, Default)]
pub struct ConfigResolver;

impl ConfigResolver {
    pub fn new() -> Self {
        Self
    }

    /// Load `path` and resolve its inheritance chain.
    ///
    /// # Errors
    ///
    /// - `NotFound` if any document, manifest or script file is missing
    /// - `ConfigurationError` if a document is malformed
    /// - `ConfigurationCycle` if a document inherits from itself
    pub fn resolve(&self, path: &Path) -> Result<ResolvedConfiguration> {
        self.visit(path, &mut Vec::new())
    }

    fn visit(&self, path: &Path, chain: &mut Vec<PathBuf>) -> Result<ResolvedConfiguration> {
        let canonical = fs::canonicalize(path).map_err(|e| SetMeUpError::from_io(e, path))?;

        if let Some(start) = chain.iter().position(|p| *p == canonical) {
            let cycle = chain[start..]
                .iter()
                .chain(std::iter::once(&canonical))
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(SetMeUpError::ConfigurationCycle { cycle });
        }

        tracing::debug!("Resolving configuration {}", path.display());
        chain.push(canonical);

        let document = load_document(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));

        let mut local_env = Vec::new();
        let declared = document
            .env_vars
            .iter()
            .map(|decl| EnvironmentVariable::from_decl(decl, path))
            .collect::<Result<Vec<_>>>()?;
        merge_env_vars(&mut local_env, declared);

        let local_steps = document
            .steps
            .iter()
            .map(|decl| SetupStep::from_decl(decl, path))
            .collect::<Result<Vec<_>>>()?;

        let inherits_paths: Vec<PathBuf> = document
            .inherits
            .iter()
            .map(|relative| base_dir.join(relative))
            .collect();

        let mut env_vars = Vec::new();
        let mut steps = Vec::new();

        for inherited_path in &inherits_paths {
            let inherited = self.visit(inherited_path, chain)?;
            merge_env_vars(&mut env_vars, inherited.env_vars);
            steps.extend(inherited.steps);
        }

        merge_env_vars(&mut env_vars, local_env);
        steps.extend(local_steps);

        chain.pop();

        Ok(ResolvedConfiguration {
            path: path.to_path_buf(),
            inherits_paths,
            env_vars,
            steps,
        })
    }
}
