//! Error types for SetMeUp operations.
//!
//! This module defines [`SetMeUpError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `SetMeUpError` for failures that abort the current phase
//! - Checksum drift and step failures are not errors; they are reported
//!   through [`crate::apply::ApplyReport`] so state can still be saved
//! - Use `anyhow::Error` (via `SetMeUpError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for SetMeUp operations.
#[derive(Debug, Error)]
pub enum SetMeUpError {
    /// A config, script, manifest or plan file does not exist or can't be read.
    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    /// Malformed configuration document or unknown step shape.
    #[error("Invalid configuration at {path}: {message}")]
    ConfigurationError { path: PathBuf, message: String },

    /// A document inherits from itself, directly or transitively.
    #[error("Configuration inherits from itself: {cycle}")]
    ConfigurationCycle { cycle: String },

    /// Plan document could not be parsed or written.
    #[error("Malformed plan at {path}: {message}")]
    MalformedPlan { path: PathBuf, message: String },

    /// A process could not be started at all.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// No value could be obtained for a required environment variable.
    #[error("No value provided for environment variable '{name}'")]
    MissingValue { name: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SetMeUpError {
    /// Map an IO error on `path` to `NotFound` when the file is missing.
    pub fn from_io(err: std::io::Error, path: &std::path::Path) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            SetMeUpError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            SetMeUpError::Io(err)
        }
    }
}

/// Result type alias for SetMeUp operations.
pub type Result<T> = std::result::Result<T, SetMeUpError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn not_found_displays_path() {
        let err = SetMeUpError::NotFound {
            path: PathBuf::from("/foo/Brewfile"),
        };
        assert!(err.to_string().contains("/foo/Brewfile"));
    }

    #[test]
    fn configuration_error_displays_path_and_message() {
        let err = SetMeUpError::ConfigurationError {
            path: PathBuf::from("/config.yaml"),
            message: "step has both brewfile and script".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yaml"));
        assert!(msg.contains("both brewfile and script"));
    }

    #[test]
    fn cycle_displays_chain() {
        let err = SetMeUpError::ConfigurationCycle {
            cycle: "a.yaml -> b.yaml -> a.yaml".into(),
        };
        assert!(err.to_string().contains("a.yaml -> b.yaml -> a.yaml"));
    }

    #[test]
    fn missing_value_displays_name() {
        let err = SetMeUpError::MissingValue {
            name: "GITHUB_TOKEN".into(),
        };
        assert!(err.to_string().contains("GITHUB_TOKEN"));
    }

    #[test]
    fn from_io_maps_missing_file_to_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = SetMeUpError::from_io(io_err, Path::new("plan.yaml"));
        assert!(matches!(err, SetMeUpError::NotFound { .. }));
    }

    #[test]
    fn from_io_keeps_other_errors() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = SetMeUpError::from_io(io_err, Path::new("plan.yaml"));
        assert!(matches!(err, SetMeUpError::Io(_)));
    }
}
