//! Plan compilation.

use crate::config::ResolvedConfiguration;
use crate::plan::Plan;
use crate::settings::Settings;

/// Project a resolved configuration into a plan.
///
/// Every step is lowered, including ones already satisfied, so the plan
/// shows both what will run and what will be skipped. Order is preserved.
pub fn compile(config: &ResolvedConfiguration, settings: &Settings) -> Plan {
    let required_env_vars = config
        .env_vars
        .iter()
        .map(|var| var.to_plan_format())
        .collect();

    let steps = config
        .steps
        .iter()
        .map(|step| step.lower_to_plan_step(settings))
        .collect();

    let plan = Plan::new(required_env_vars, steps);
    tracing::info!(
        "Compiled plan with {} step(s), {} already satisfied",
        plan.steps.len(),
        plan.skipped_count()
    );
    plan
}
