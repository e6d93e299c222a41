//! Plan application.
//!
//! The [`ApplyEngine`] walks a loaded [`crate::plan::Plan`] through three
//! phases:
//!
//! 1. Validating: every step's checksum is recomputed; any drift aborts the
//!    whole apply before anything touches the machine
//! 2. Setting env: required variables are set in the process environment
//!    and persisted to their `store_in` files
//! 3. Executing: steps run in order; a failing step halts the rest
//!
//! The updated plan is saved back after every apply that gets past
//! validation. Everything that happens is recorded as an [`ApplyEvent`] in
//! the returned [`ApplyReport`].

pub mod engine;
pub mod profile;
pub mod provider;
pub mod report;

pub use engine::ApplyEngine;
pub use profile::store_variable;
pub use provider::{EnvValueProvider, PromptValueProvider, ValueProvider, VALUE_ENV_PREFIX};
pub use report::{ApplyEvent, ApplyReport, ApplyState};
