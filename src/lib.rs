//! SetMeUp - declarative, inheritable machine setup.
//!
//! SetMeUp turns YAML profiles describing setup steps (Homebrew bundles and
//! scripts) into a replayable execution plan, then applies that plan
//! idempotently.
//!
//! # Modules
//!
//! - [`apply`] - Checksum gate, environment setup and step execution
//! - [`checksum`] - Content digests for change detection
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Profile loading and `inherits:` resolution
//! - [`error`] - Error types and result aliases
//! - [`plan`] - Plan compilation, persistence and display
//! - [`settings`] - Runtime settings
//! - [`shell`] - Shell command execution
//!
//! # Example
//!
//! ```
//! use setmeup::config::ConfigResolver;
//! use setmeup::plan::compile;
//! use setmeup::Settings;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let profile = temp.path().join("laptop.yaml");
//! fs::write(&profile, "steps:\n  - script: echo hello\n    completion_check: 'true'\n").unwrap();
//!
//! let resolved = ConfigResolver::new().resolve(&profile).unwrap();
//! let plan = compile(&resolved, &Settings::default());
//! assert_eq!(plan.steps.len(), 1);
//! assert!(plan.steps[0].skip);
//! ```

pub mod apply;
pub mod checksum;
pub mod cli;
pub mod config;
pub mod error;
pub mod plan;
pub mod settings;
pub mod shell;

pub use error::{Result, SetMeUpError};
pub use settings::Settings;
