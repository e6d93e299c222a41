//! Plan persistence.
//!
//! Plans are YAML documents. The store remembers the last path it read or
//! wrote so the apply phase can save progress back to the same file.

use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::invalid_name_reason;
use crate::error::{Result, SetMeUpError};
use crate::plan::{Plan, PLAN_FORMAT_VERSION};
use crate::settings::DEFAULT_PLAN_FILE_NAME;

/// Reads and writes plan documents.
#[derive(Debug, Default)]
pub struct PlanStore {
    last_path: Option<PathBuf>,
}

impl PlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The path most recently loaded from or saved to.
    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_deref()
    }

    /// Stamp `generated_at` and write the plan to `path`.
    ///
    /// Uses write-to-temp-then-rename so an interrupted save never leaves a
    /// partially written plan behind.
    pub fn save(&mut self, plan: &mut Plan, path: &Path) -> Result<PathBuf> {
        plan.generated_at = Utc::now();

        let content = serde_yaml::to_string(plan).map_err(|e| SetMeUpError::MalformedPlan {
            path: path.to_path_buf(),
            message: format!("Failed to serialize plan: {}", e),
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        tracing::debug!("Saved plan to {}", path.display());
        self.last_path = Some(path.to_path_buf());
        Ok(path.to_path_buf())
    }

    /// Save to the last used path, or the default plan file if there is none.
    pub fn save_to_last(&mut self, plan: &mut Plan) -> Result<PathBuf> {
        let path = self
            .last_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PLAN_FILE_NAME));
        self.save(plan, &path)
    }

    /// Read a plan from `path`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the file doesn't exist.
    /// Returns `MalformedPlan` if it isn't a valid plan document or names a
    /// variable that can't be set.
    pub fn load(&mut self, path: &Path) -> Result<Plan> {
        let content = fs::read_to_string(path).map_err(|e| SetMeUpError::from_io(e, path))?;

        let plan: Plan = serde_yaml::from_str(&content).map_err(|e| SetMeUpError::MalformedPlan {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        for var in &plan.required_env_vars {
            if let Some(reason) = invalid_name_reason(&var.name) {
                return Err(SetMeUpError::MalformedPlan {
                    path: path.to_path_buf(),
                    message: format!("environment variable {:?}: {}", var.name, reason),
                });
            }
        }

        if major_version(&plan.format_version) != major_version(PLAN_FORMAT_VERSION) {
            tracing::warn!(
                "Plan {} was written with format {} (expected {}); applying anyway",
                path.display(),
                plan.format_version,
                PLAN_FORMAT_VERSION
            );
        }

        self.last_path = Some(path.to_path_buf());
        Ok(plan)
    }
}

fn major_version(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}
