//! Command implementations.

pub mod apply;
pub mod completions;
pub mod dispatcher;
pub mod plan;

pub use apply::ApplyCommand;
pub use completions::CompletionsCommand;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use plan::PlanCommand;
