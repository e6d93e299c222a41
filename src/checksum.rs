//! Content digests for step change detection.
//!
//! Every setup step carries a SHA-256 snapshot of its source (a manifest
//! file, a script file or an inline command). The apply phase recomputes
//! the digest and refuses to run a plan whose sources have drifted.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use crate::error::{Result, SetMeUpError};

/// How a checksum's origin is turned back into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumKind {
    /// Origin is a path; digest the file contents.
    File,
    /// Origin is the literal content.
    String,
}

/// Compute the hex SHA-256 digest of a file's contents.
///
/// # Errors
///
/// Returns `NotFound` if the path does not exist.
pub fn digest_of_file(path: &Path) -> Result<String> {
    let content = fs::read(path).map_err(|e| SetMeUpError::from_io(e, path))?;
    Ok(digest_of_bytes(&content))
}

/// Compute the hex SHA-256 digest of a literal string.
pub fn digest_of_string(text: &str) -> String {
    digest_of_bytes(text.as_bytes())
}

fn digest_of_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Recompute a digest from a recorded origin.
pub fn digest_of_origin(origin: &str, kind: ChecksumKind) -> Result<String> {
    match kind {
        ChecksumKind::File => digest_of_file(Path::new(origin)),
        ChecksumKind::String => Ok(digest_of_string(origin)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn digest_of_string_is_sha256_hex() {
        assert_eq!(
            digest_of_string("hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn digest_is_deterministic() {
        assert_eq!(digest_of_string("brew install git"), digest_of_string("brew install git"));
        assert_ne!(digest_of_string("brew install git"), digest_of_string("brew install gh"));
    }

    #[test]
    fn file_and_string_digests_agree_on_same_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Brewfile");
        fs::write(&path, "brew \"git\"\n").unwrap();

        assert_eq!(
            digest_of_file(&path).unwrap(),
            digest_of_string("brew \"git\"\n")
        );
    }

    #[test]
    fn digest_of_missing_file_is_not_found() {
        let result = digest_of_file(Path::new("/nonexistent/Brewfile"));
        assert!(matches!(result, Err(SetMeUpError::NotFound { .. })));
    }

    #[test]
    fn digest_of_origin_dispatches_on_kind() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("setup.sh");
        fs::write(&path, "echo hi").unwrap();
        let origin = path.to_string_lossy().to_string();

        assert_eq!(
            digest_of_origin(&origin, ChecksumKind::File).unwrap(),
            digest_of_string("echo hi")
        );
        assert_eq!(
            digest_of_origin("echo hi", ChecksumKind::String).unwrap(),
            digest_of_string("echo hi")
        );
    }

    #[test]
    fn checksum_kind_serializes_lowercase() {
        assert_eq!(serde_yaml::to_string(&ChecksumKind::File).unwrap().trim(), "file");
        assert_eq!(serde_yaml::to_string(&ChecksumKind::String).unwrap().trim(), "string");
    }
}
