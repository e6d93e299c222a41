//! Configuration loading and inheritance resolution.
//!
//! - Document schema in [`schema`]
//! - File loading in [`loader`]
//! - Environment variable declarations in [`env_var`]
//! - Setup steps in [`step`]
//! - Recursive `inherits:` resolution in [`resolver`]
//!
//! # Example
//!
//! ```
//! use setmeup::config::ConfigResolver;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("base.yaml"), "steps:\n  - script: echo base\n").unwrap();
//! fs::write(
//!     temp.path().join("laptop.yaml"),
//!     "inherits: [base.yaml]\nsteps:\n  - script: echo laptop\n",
//! )
//! .unwrap();
//!
//! let resolved = ConfigResolver::new().resolve(&temp.path().join("laptop.yaml")).unwrap();
//! let names: Vec<_> = resolved.steps.iter().map(|s| s.name.as_str()).collect();
//! assert_eq!(names, ["Execute Script echo base", "Execute Script echo laptop"]);
//! ```

pub mod env_var;
pub mod loader;
pub mod resolver;
pub mod schema;
pub mod step;

pub use env_var::{invalid_name_reason, merge_env_vars, EnvironmentVariable};
pub use loader::{load_document, parse_document};
pub use resolver::{ConfigResolver, ResolvedConfiguration};
pub use schema::{ConfigDocument, EnvVarDecl, StepDecl};
pub use step::{ScriptSource, SetupStep, StepKind};
