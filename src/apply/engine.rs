//! The apply state machine.

use chrono::Utc;
use std::path::{Path, PathBuf};

use crate::apply::profile::store_variable;
use crate::apply::provider::ValueProvider;
use crate::apply::report::{ApplyEvent, ApplyReport, ApplyState};
use crate::checksum::digest_of_origin;
use crate::config::invalid_name_reason;
use crate::error::{Result, SetMeUpError};
use crate::plan::{Plan, PlanStore, StepStatus};
use crate::settings::{Settings, DEFAULT_PLAN_FILE_NAME};
use crate::shell::{execute, execute_check, CommandOptions};

/// Applies plans against the host.
///
/// # Example
///
/// ```no_run
/// use setmeup::apply::{ApplyEngine, EnvValueProvider};
/// use setmeup::plan::PlanStore;
/// use setmeup::Settings;
/// use std::path::Path;
///
/// let settings = Settings::from_env();
/// let mut store = PlanStore::new();
/// let mut plan = store.load(Path::new("setmeup_plan.yaml")).unwrap();
/// let mut provider = EnvValueProvider::from_env();
///
/// let report = ApplyEngine::new(&settings, &mut store, &mut provider)
///     .apply(&mut plan)
///     .unwrap();
/// println!("{:?}", report.state);
/// ```
pub struct ApplyEngine<'a> {
    settings: &'a Settings,
    store: &'a mut PlanStore,
    provider: &'a mut dyn ValueProvider,
}

impl<'a> ApplyEngine<'a> {
    pub fn new(
        settings: &'a Settings,
        store: &'a mut PlanStore,
        provider: &'a mut dyn ValueProvider,
    ) -> Self {
        Self {
            settings,
            store,
            provider,
        }
    }

    /// Apply `plan`, updating it in place.
    ///
    /// Returns `Aborted` without touching anything if any checksum drifted.
    /// Otherwise the plan is saved back to the store's last path whether
    /// the steps finished (`Done`) or one failed (`Halted`).
    ///
    /// # Errors
    ///
    /// Fails if a variable value can't be obtained, a profile file can't be
    /// written, or the plan can't be saved. Step failures are not errors.
    pub fn apply(&mut self, plan: &mut Plan) -> Result<ApplyReport> {
        let mut report = ApplyReport::new();

        if !self.validate_checksums(plan, &mut report) {
            report.state = ApplyState::Aborted;
            return Ok(report);
        }

        self.set_env_vars(plan, &mut report)?;

        report.state = self.execute_steps(plan, &mut report);

        let path = self.store.save_to_last(plan)?;
        report.record(ApplyEvent::PlanSaved { path });

        Ok(report)
    }

    fn plan_path(&self) -> PathBuf {
        self.store
            .last_path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PLAN_FILE_NAME))
    }

    fn validate_checksums(&self, plan: &Plan, report: &mut ApplyReport) -> bool {
        let mut all_match = true;

        for step in &plan.steps {
            let actual = match digest_of_origin(&step.checksum.origin, step.checksum.kind) {
                Ok(digest) => digest,
                Err(SetMeUpError::NotFound { .. }) => "missing".to_string(),
                Err(e) => format!("unreadable ({})", e),
            };

            if actual == step.checksum.value {
                report.record(ApplyEvent::ChecksumVerified {
                    step: step.name.clone(),
                });
            } else {
                all_match = false;
                report.record(ApplyEvent::ChecksumMismatch {
                    step: step.name.clone(),
                    expected: step.checksum.value.clone(),
                    actual,
                });
            }
        }

        all_match
    }

    fn set_env_vars(&mut self, plan: &Plan, report: &mut ApplyReport) -> Result<()> {
        for var in &plan.required_env_vars {
            if let Some(reason) = invalid_name_reason(&var.name) {
                return Err(SetMeUpError::MalformedPlan {
                    path: self.plan_path(),
                    message: format!("environment variable {:?}: {}", var.name, reason),
                });
            }
        }

        for var in &plan.required_env_vars {
            let value = match std::env::var_os(&var.name) {
                Some(existing) => {
                    report.record(ApplyEvent::EnvAlreadySet {
                        name: var.name.clone(),
                    });
                    existing.to_string_lossy().to_string()
                }
                None => {
                    let value = match &var.value {
                        Some(value) => value.clone(),
                        None => self.provider.provide(var)?,
                    };
                    std::env::set_var(&var.name, &value);
                    report.record(ApplyEvent::EnvSet {
                        name: var.name.clone(),
                    });
                    value
                }
            };

            if let Some(store_in) = &var.store_in {
                let path = store_variable(store_in, &var.name, &value)?;
                report.record(ApplyEvent::EnvStored {
                    name: var.name.clone(),
                    path,
                });
            }
        }

        Ok(())
    }

    fn execute_steps(&self, plan: &mut Plan, report: &mut ApplyReport) -> ApplyState {
        for step in plan.steps.iter_mut() {
            step.status = StepStatus::Pending;
        }

        for step in plan.steps.iter_mut() {
            let satisfied = step
                .validation
                .as_deref()
                .map(|command| execute_check(command, self.settings))
                .unwrap_or(false);

            if satisfied {
                step.skip = true;
                step.status = StepStatus::Skipped;
                report.record(ApplyEvent::StepAlreadySatisfied {
                    step: step.name.clone(),
                });
                continue;
            }

            step.skip = false;
            report.record(ApplyEvent::StepStarted {
                step: step.name.clone(),
            });

            let result = execute(&step.execute, self.settings, &CommandOptions::default());
            step.executed_at = Some(Utc::now());

            let code = match result {
                Ok(r) => {
                    tracing::debug!("'{}' finished in {:.2?}", step.name, r.duration);
                    (!r.success).then_some(r.exit_code)
                }
                Err(e) => {
                    tracing::debug!("Could not start '{}': {}", step.execute, e);
                    Some(None)
                }
            };

            if let Some(code) = code {
                step.status = StepStatus::Failed;
                report.record(ApplyEvent::StepFailed {
                    step: step.name.clone(),
                    code,
                });
                return ApplyState::Halted;
            }

            let verified = step
                .validation
                .as_deref()
                .map(|command| execute_check(command, self.settings));

            match verified {
                None => {
                    step.status = StepStatus::Completed;
                    report.record(ApplyEvent::StepUnverifiable {
                        step: step.name.clone(),
                    });
                }
                Some(true) => {
                    step.skip = true;
                    step.status = StepStatus::Verified;
                    report.record(ApplyEvent::StepVerified {
                        step: step.name.clone(),
                    });
                }
                Some(false) => {
                    step.status = StepStatus::VerificationFailed;
                    report.record(ApplyEvent::StepVerificationFailed {
                        step: step.name.clone(),
                    });
                }
            }
        }

        ApplyState::Done
    }
}
