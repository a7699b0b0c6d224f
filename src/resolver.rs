//! Destination and project name validation
//!
//! Produces a validated, immutable `SetupRequest`. This module never creates
//! or deletes anything; the writability probe is a temp file that is removed
//! on drop.

use std::path::{Path, PathBuf};

use normpath::PathExt;

use crate::error::{Result, SetupError};

/// Characters that are not allowed in a project name
///
/// Union of path separators and characters invalid on Windows, matching the
/// most restrictive host filesystem.
pub const NAME_UNSAFE_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// A validated setup request: existing writable root plus a clean project name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupRequest {
    destination_root: PathBuf,
    project_name: String,
}

impl SetupRequest {
    /// Normalized absolute destination root
    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    /// Trimmed project name
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// The project root `<destination_root>/<project_name>` (not yet created)
    pub fn project_root(&self) -> PathBuf {
        self.destination_root.join(&self.project_name)
    }
}

/// Validate destination root and project name.
///
/// Checks run in order: root exists as a directory, root is writable
/// (verified by a probe write), project name is a clean single path segment.
/// Each failure is a distinct error variant so callers can branch on the
/// cause.
pub fn resolve(destination_root: &str, project_name: &str) -> Result<SetupRequest> {
    let root = validate_root(destination_root)?;
    let name = validate_project_name(project_name)?;

    Ok(SetupRequest {
        destination_root: root,
        project_name: name,
    })
}

fn validate_root(destination_root: &str) -> Result<PathBuf> {
    let trimmed = destination_root.trim();
    if trimmed.is_empty() {
        return Err(SetupError::RootNotFound {
            path: destination_root.to_string(),
        });
    }

    let candidate = PathBuf::from(trimmed);
    // Lexical normalization first; canonicalization below resolves symlinks
    // without producing UNC paths on Windows.
    let candidate = candidate
        .normalize()
        .map(|p| p.into_path_buf())
        .unwrap_or(candidate);

    if !candidate.exists() {
        return Err(SetupError::RootNotFound {
            path: candidate.display().to_string(),
        });
    }
    if !candidate.is_dir() {
        return Err(SetupError::RootNotADirectory {
            path: candidate.display().to_string(),
        });
    }

    let root = dunce::canonicalize(&candidate).map_err(|e| SetupError::RootNotFound {
        path: format!("{} ({})", candidate.display(), e),
    })?;

    probe_writable(&root)?;
    Ok(root)
}

/// Verify write permission by actually creating a scratch file in the root.
///
/// A permission bit check would miss read-only mounts and ACLs.
fn probe_writable(root: &Path) -> Result<()> {
    tempfile::NamedTempFile::new_in(root)
        .map(|_| ())
        .map_err(|e| SetupError::RootNotWritable {
            path: root.display().to_string(),
            reason: e.to_string(),
        })
}

fn validate_project_name(project_name: &str) -> Result<String> {
    let name = project_name.trim();

    if name.is_empty() {
        return Err(SetupError::InvalidProjectName {
            name: project_name.to_string(),
            reason: "name is empty".to_string(),
        });
    }

    if name == "." || name == ".." {
        return Err(SetupError::InvalidProjectName {
            name: name.to_string(),
            reason: "name is a reserved path segment".to_string(),
        });
    }

    if let Some(bad) = name.chars().find(|c| NAME_UNSAFE_CHARS.contains(c)) {
        return Err(SetupError::InvalidProjectName {
            name: name.to_string(),
            reason: format!("contains illegal character '{bad}'"),
        });
    }

    if name.chars().any(char::is_control) {
        return Err(SetupError::InvalidProjectName {
            name: name.to_string(),
            reason: "contains control characters".to_string(),
        });
    }

    Ok(name.to_string())
}
