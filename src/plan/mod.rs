//! Execution plans.
//!
//! A [`Plan`] is the hand-off between the `plan` and `apply` phases: an
//! ordered list of [`PlanStep`]s with checksum snapshots and concrete
//! command lines, plus the environment variables the steps need.
//!
//! - [`compiler`] projects a resolved configuration into a plan
//! - [`store`] reads and writes plan documents
//! - [`display`] renders a plan for humans

pub mod compiler;
pub mod display;
pub mod store;

pub use compiler::compile;
pub use store::PlanStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checksum::ChecksumKind;

/// Format version written into new plans.
pub const PLAN_FORMAT_VERSION: &str = "1.0";

/// A compiled, replayable execution plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Plan format version, carried through unchanged on load.
    #[serde(rename = "setmeup_version")]
    pub format_version: String,

    /// When the plan was last written.
    pub generated_at: DateTime<Utc>,

    /// Variables that must be present before steps run.
    #[serde(default)]
    pub required_env_vars: Vec<PlanEnvVar>,

    /// Steps in execution order.
    #[serde(rename = "steps_to_execute", default)]
    pub steps: Vec<PlanStep>,
}

impl Plan {
    /// Create a plan stamped with the current time.
    pub fn new(required_env_vars: Vec<PlanEnvVar>, steps: Vec<PlanStep>) -> Self {
        Self {
            format_version: PLAN_FORMAT_VERSION.to_string(),
            generated_at: Utc::now(),
            required_env_vars,
            steps,
        }
    }

    /// Steps that are not already satisfied.
    pub fn pending_steps(&self) -> impl Iterator<Item = &PlanStep> {
        self.steps.iter().filter(|s| !s.skip)
    }

    /// Number of steps marked as already satisfied.
    pub fn skipped_count(&self) -> usize {
        self.steps.iter().filter(|s| s.skip).count()
    }
}

/// Plan record of a required environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEnvVar {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub store_in: Option<String>,

    #[serde(default)]
    pub value: Option<String>,
}

/// Checksum snapshot of a step's source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanChecksum {
    pub value: String,

    /// Path or literal the digest was computed from.
    pub origin: String,

    #[serde(rename = "checksum_type")]
    pub kind: ChecksumKind,
}

/// Outcome of a step in the most recent apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Not attempted yet.
    #[default]
    Pending,
    /// Validation reported the step as already satisfied.
    Skipped,
    /// Ran successfully; no validation command to confirm it.
    Completed,
    /// Ran successfully and validation confirmed it.
    Verified,
    /// Ran successfully but validation still fails.
    VerificationFailed,
    /// Execute command exited non-zero.
    Failed,
}

/// A single executable step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    pub checksum: PlanChecksum,

    /// Command line that performs the step.
    pub execute: String,

    /// Command line that exits zero once the step is satisfied.
    #[serde(default)]
    pub validation: Option<String>,

    /// Whether validation passed when last checked.
    #[serde(default)]
    pub skip: bool,

    #[serde(default)]
    pub executed_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub status: StepStatus,
}

impl PlanStep {
    pub fn new(
        name: String,
        description: Option<String>,
        checksum: PlanChecksum,
        execute: String,
        validation: Option<String>,
        skip: bool,
    ) -> Self {
        Self {
            name,
            description,
            checksum,
            execute,
            validation,
            skip,
            executed_at: None,
            status: StepStatus::Pending,
        }
    }
}
