//! Directory skeleton creation under the project root
//!
//! Non-destructive policy: existing directories and their content are
//! preserved, and only genuinely new directories are reported as created.

use std::path::{Path, PathBuf};

use crate::error::{Result, SetupError};

/// Outcome of building the directory skeleton
#[derive(Debug, Default)]
pub struct LayoutReport {
    /// Directories newly created by this run, in plan order
    pub created: Vec<PathBuf>,
    /// Directories that already existed and were left alone
    pub existing: Vec<PathBuf>,
    /// Per-directory failures; the rest of the plan is still attempted
    pub errors: Vec<SetupError>,
}

/// Create the project root and the planned subdirectories.
///
/// Creation is recursive and idempotent. A failure on one subdirectory does
/// not roll back the ones already created; the error is recorded and the
/// remaining entries are attempted. Only a failure to create the project root
/// itself is fatal.
pub fn build(project_root: &Path, plan: &[String]) -> Result<LayoutReport> {
    let mut report = LayoutReport::default();

    if project_root.exists() {
        report.existing.push(project_root.to_path_buf());
    } else {
        std::fs::create_dir_all(project_root).map_err(|e| {
            SetupError::ProjectRootCreationFailed {
                path: project_root.display().to_string(),
                reason: e.to_string(),
            }
        })?;
        report.created.push(project_root.to_path_buf());
    }

    for subdir in plan {
        let path = project_root.join(subdir);
        if path.is_dir() {
            report.existing.push(path);
            continue;
        }

        match std::fs::create_dir_all(&path) {
            Ok(()) => report.created.push(path),
            Err(e) => report.errors.push(SetupError::DirectoryCreationFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    Ok(report)
}
