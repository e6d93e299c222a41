//! Shell command execution and terminal detection.

pub mod command;
pub mod platform;
pub mod quote;

pub use command::{execute, execute_check, CommandOptions, CommandResult};
pub use platform::{ci_from_lookup, is_ci, is_interactive};
pub use quote::quote;
