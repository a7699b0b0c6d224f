//! Artifact installation from the shared source location
//!
//! Dispatches each `ArtifactSpec` to the archive or file path and keeps the
//! unreachable-source case (`SourceUnavailable`) distinct from bad archive
//! bytes (`CorruptArchive`): the remediation differs.

mod archive;
mod copy;

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::error::{Result, SetupError};
use crate::report::Reporter;
use crate::toolchain::{ArtifactKind, ArtifactSpec};

/// What to do when an artifact already exists at its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ConflictPolicy {
    /// Replace the existing content, with a logged warning
    #[default]
    Overwrite,
    /// Leave the existing content and report the artifact as skipped
    Skip,
    /// Record an error for this artifact and continue with the rest
    Fail,
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConflictPolicy::Overwrite => "overwrite",
            ConflictPolicy::Skip => "skip",
            ConflictPolicy::Fail => "fail",
        };
        f.write_str(name)
    }
}

/// Result of installing one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed { path: PathBuf, entries: usize },
    Skipped { path: PathBuf },
}

/// Install one artifact into its target directory under the project root.
///
/// Side effects are confined to the artifact's declared target directory.
pub fn install(
    spec: &ArtifactSpec,
    source_root: &Path,
    project_root: &Path,
    policy: ConflictPolicy,
    reporter: &dyn Reporter,
) -> Result<InstallOutcome> {
    if !source_root.is_dir() {
        return Err(SetupError::SourceUnavailable {
            path: source_root.display().to_string(),
            reason: "shared source location is unreachable".to_string(),
        });
    }

    let source = spec.source_path(source_root);
    if !source.is_file() {
        return Err(SetupError::SourceUnavailable {
            path: source.display().to_string(),
            reason: "artifact not found at the shared source location".to_string(),
        });
    }

    let target_dir = spec.target_dir(project_root);
    match spec.kind {
        ArtifactKind::Archive => archive::extract(&source, &target_dir, policy, reporter),
        ArtifactKind::File => copy::copy_file(&source, &target_dir, policy, reporter),
    }
}
