//! Configuration file loading.

use crate::config::schema::ConfigDocument;
use crate::error::{Result, SetMeUpError};
use std::fs;
use std::path::Path;

/// Load a single configuration document.
///
/// # Errors
///
/// Returns `NotFound` if the file doesn't exist.
/// Returns `ConfigurationError` if the YAML is invalid.
pub fn load_document(path: &Path) -> Result<ConfigDocument> {
    let content = fs::read_to_string(path).map_err(|e| SetMeUpError::from_io(e, path))?;
    parse_document(&content, path)
}

/// Parse YAML content into a [`ConfigDocument`].
///
/// An empty file is a valid, empty document.
pub fn parse_document(content: &str, source_path: &Path) -> Result<ConfigDocument> {
    if content.trim().is_empty() {
        return Ok(ConfigDocument::default());
    }

    serde_yaml::from_str(content).map_err(|e| SetMeUpError::ConfigurationError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_document_parses_valid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "steps:\n  - script: echo hi\n").unwrap();

        let doc = load_document(&path).unwrap();
        assert_eq!(doc.steps.len(), 1);
    }

    #[test]
    fn load_document_returns_not_found() {
        let result = load_document(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(SetMeUpError::NotFound { .. })));
    }

    #[test]
    fn parse_document_rejects_invalid_yaml() {
        let result = parse_document("steps: [", Path::new("bad.yaml"));
        assert!(matches!(
            result,
            Err(SetMeUpError::ConfigurationError { .. })
        ));
    }

    #[test]
    fn parse_document_rejects_wrong_shape() {
        let result = parse_document("steps: not-a-list", Path::new("bad.yaml"));
        assert!(matches!(
            result,
            Err(SetMeUpError::ConfigurationError { .. })
        ));
    }

    #[test]
    fn empty_file_is_empty_document() {
        let doc = parse_document("\n", Path::new("empty.yaml")).unwrap();
        assert_eq!(doc, ConfigDocument::default());
    }
}
