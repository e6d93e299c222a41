//! Stored-variable files.
//!
//! Variables with `store_in` are persisted as `export NAME="value"` lines so
//! new shells pick them up. An existing assignment is replaced where it is;
//! otherwise a new line is appended.

use regex::Regex;
use std::fs;
use std::path::PathBuf;

use crate::error::{Result, SetMeUpError};

/// Write `export NAME="value"` into the file at `path`.
///
/// A leading `~` in `path` is expanded. The file and its parent directory
/// are created if needed. Returns the expanded path.
pub fn store_variable(path: &str, name: &str, value: &str) -> Result<PathBuf> {
    let path = PathBuf::from(shellexpand::tilde(path).as_ref());

    let existing = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(SetMeUpError::from_io(e, &path)),
    };

    let updated = upsert_assignment(&existing, name, value)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    // Written in place: profiles are often symlinks into a dotfiles repo.
    fs::write(&path, updated).map_err(|e| SetMeUpError::from_io(e, &path))?;

    Ok(path)
}

/// Return `content` with the assignment of `name` replaced or appended.
pub fn upsert_assignment(content: &str, name: &str, value: &str) -> Result<String> {
    let pattern = Regex::new(&format!(r"^\s*(?:export\s+)?{}=", regex::escape(name)))
        .map_err(|e| anyhow::anyhow!("invalid variable name '{}': {}", name, e))?;
    let assignment = format!("export {}=\"{}\"", name, escape(value));

    let mut replaced = false;
    let mut lines: Vec<String> = content
        .lines()
        .map(|line| {
            if pattern.is_match(line) {
                replaced = true;
                assignment.clone()
            } else {
                line.to_string()
            }
        })
        .collect();

    if !replaced {
        lines.push(assignment);
    }

    let mut updated = lines.join("\n");
    updated.push('\n');
    Ok(updated)
}

/// Escape a value for use inside double quotes.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
