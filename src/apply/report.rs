//! Apply events and reports.

use std::fmt;
use std::path::PathBuf;

/// Terminal state of an apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyState {
    /// Every step was run or skipped.
    Done,
    /// A step failed; later steps were not attempted.
    Halted,
    /// Checksums drifted; nothing was changed.
    Aborted,
}

/// Something that happened during an apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyEvent {
    ChecksumVerified {
        step: String,
    },
    /// The step's source changed since the plan was compiled.
    ChecksumMismatch {
        step: String,
        expected: String,
        actual: String,
    },
    EnvAlreadySet {
        name: String,
    },
    EnvSet {
        name: String,
    },
    EnvStored {
        name: String,
        path: PathBuf,
    },
    StepAlreadySatisfied {
        step: String,
    },
    StepStarted {
        step: String,
    },
    StepFailed {
        step: String,
        code: Option<i32>,
    },
    StepVerified {
        step: String,
    },
    /// The step ran but has no validation command to confirm it.
    StepUnverifiable {
        step: String,
    },
    /// The step ran but its validation command still fails.
    StepVerificationFailed {
        step: String,
    },
    PlanSaved {
        path: PathBuf,
    },
}

impl ApplyEvent {
    /// The step this event is about, if any.
    pub fn step(&self) -> Option<&str> {
        match self {
            Self::ChecksumVerified { step }
            | Self::ChecksumMismatch { step, .. }
            | Self::StepAlreadySatisfied { step }
            | Self::StepStarted { step }
            | Self::StepFailed { step, .. }
            | Self::StepVerified { step }
            | Self::StepUnverifiable { step }
            | Self::StepVerificationFailed { step } => Some(step),
            _ => None,
        }
    }

    /// Whether the event reports an error condition.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::StepFailed { .. } | Self::StepVerificationFailed { .. }
        )
    }

    /// Whether the event should be shown as a warning.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::ChecksumMismatch { .. })
    }

    fn trace(&self) {
        if self.is_error() {
            tracing::error!("{}", self);
        } else if self.is_warning() {
            tracing::warn!("{}", self);
        } else if matches!(self, Self::ChecksumVerified { .. } | Self::PlanSaved { .. }) {
            tracing::debug!("{}", self);
        } else {
            tracing::info!("{}", self);
        }
    }
}

impl fmt::Display for ApplyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChecksumVerified { step } => write!(f, "Checksum verified: {}", step),
            Self::ChecksumMismatch {
                step,
                expected,
                actual,
            } => write!(
                f,
                "Checksum mismatch for '{}' (planned {}, now {}); regenerate the plan",
                step, expected, actual
            ),
            Self::EnvAlreadySet { name } => write!(f, "{} already set", name),
            Self::EnvSet { name } => write!(f, "Set {}", name),
            Self::EnvStored { name, path } => write!(f, "Stored {} in {}", name, path.display()),
            Self::StepAlreadySatisfied { step } => write!(f, "Already satisfied: {}", step),
            Self::StepStarted { step } => write!(f, "Executing: {}", step),
            Self::StepFailed { step, code } => match code {
                Some(code) => write!(f, "Step '{}' failed with exit code {}", step, code),
                None => write!(f, "Step '{}' could not be run", step),
            },
            Self::StepVerified { step } => write!(f, "Completed and verified: {}", step),
            Self::StepUnverifiable { step } => {
                write!(f, "Completed (no completion check to verify): {}", step)
            }
            Self::StepVerificationFailed { step } => write!(
                f,
                "Step '{}' ran but its completion check still fails",
                step
            ),
            Self::PlanSaved { path } => write!(f, "Plan saved to {}", path.display()),
        }
    }
}

/// Outcome of an apply: its terminal state and everything that happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub state: ApplyState,
    pub events: Vec<ApplyEvent>,
}

impl ApplyReport {
    pub(crate) fn new() -> Self {
        Self {
            state: ApplyState::Done,
            events: Vec::new(),
        }
    }

    /// Append an event and emit it as a tracing event.
    pub(crate) fn record(&mut self, event: ApplyEvent) {
        event.trace();
        self.events.push(event);
    }

    /// Names of steps whose execute command was run.
    pub fn executed_steps(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ApplyEvent::StepStarted { step } => Some(step.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Names of steps whose checksum drifted.
    pub fn mismatched_steps(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ApplyEvent::ChecksumMismatch { step, .. } => Some(step.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn is_success(&self) -> bool {
        self.state == ApplyState::Done
    }
}
