//! Verbatim configuration file copy with digest verification

use std::path::Path;

use crate::error::{Result, SetupError};
use crate::hash;
use crate::installer::{ConflictPolicy, InstallOutcome};
use crate::report::{Reporter, SetupEvent};

/// Copy `source` into `target_dir`, byte for byte.
///
/// The copy is verified by comparing BLAKE3 digests of source and target. An
/// existing file at the target follows the conflict policy; the default
/// overwrite path warns and replaces, it never fails and never overwrites
/// silently.
pub fn copy_file(
    source: &Path,
    target_dir: &Path,
    policy: ConflictPolicy,
    reporter: &dyn Reporter,
) -> Result<InstallOutcome> {
    let copy_failed = |path: &Path, reason: String| SetupError::FileCopyFailed {
        path: path.display().to_string(),
        reason,
    };

    let file_name = source
        .file_name()
        .ok_or_else(|| copy_failed(source, "source has no file name".to_string()))?;
    let target = target_dir.join(file_name);

    if target.exists() {
        match policy {
            ConflictPolicy::Fail => {
                return Err(SetupError::ArtifactConflict {
                    path: target.display().to_string(),
                });
            }
            ConflictPolicy::Skip => {
                return Ok(InstallOutcome::Skipped { path: target });
            }
            ConflictPolicy::Overwrite => {
                reporter.event(&SetupEvent::OverwriteWarning {
                    path: target.clone(),
                });
            }
        }
    }

    // Layout failures may have left the target directory missing
    if !target_dir.exists() {
        std::fs::create_dir_all(target_dir).map_err(|e| copy_failed(target_dir, e.to_string()))?;
    }

    std::fs::copy(source, &target).map_err(|e| copy_failed(&target, e.to_string()))?;

    let source_digest = hash::hash_file(source).map_err(|e| copy_failed(source, e.to_string()))?;
    let target_digest = hash::hash_file(&target).map_err(|e| copy_failed(&target, e.to_string()))?;
    if !hash::verify_hash(&source_digest, &target_digest) {
        return Err(copy_failed(&target, "digest mismatch after copy".to_string()));
    }

    Ok(InstallOutcome::Installed {
        path: target,
        entries: 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RecordingReporter;
    use tempfile::TempDir;

    #[test]
    fn test_copy_file_verbatim() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("CCAST_.cfg");
        std::fs::write(&source, b"C_COMPILER_TAG: TRICORE\r\nbinary\x00bytes").unwrap();
        let target_dir = temp.path().join("Master_CFG");
        std::fs::create_dir_all(&target_dir).unwrap();

        let outcome = copy_file(
            &source,
            &target_dir,
            ConflictPolicy::Overwrite,
            &RecordingReporter::new(),
        )
        .unwrap();

        let target = target_dir.join("CCAST_.cfg");
        assert_eq!(
            outcome,
            InstallOutcome::Installed {
                path: target.clone(),
                entries: 1
            }
        );
        assert_eq!(
            std::fs::read(&source).unwrap(),
            std::fs::read(&target).unwrap()
        );
    }

    #[test]
    fn test_copy_overwrite_warns() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("CCAST_.cfg");
        std::fs::write(&source, "new config").unwrap();
        let target_dir = temp.path().join("Master_CFG");
        std::fs::create_dir_all(&target_dir).unwrap();
        std::fs::write(target_dir.join("CCAST_.cfg"), "old config").unwrap();
        let reporter = RecordingReporter::new();

        let outcome = copy_file(&source, &target_dir, ConflictPolicy::Overwrite, &reporter);

        assert!(outcome.is_ok());
        assert_eq!(
            std::fs::read_to_string(target_dir.join("CCAST_.cfg")).unwrap(),
            "new config"
        );
        assert!(reporter
            .events()
            .iter()
            .any(|e| matches!(e, SetupEvent::OverwriteWarning { .. })));
    }

    #[test]
    fn test_copy_skip_leaves_existing() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("CCAST_.cfg");
        std::fs::write(&source, "new config").unwrap();
        let target_dir = temp.path().join("Master_CFG");
        std::fs::create_dir_all(&target_dir).unwrap();
        std::fs::write(target_dir.join("CCAST_.cfg"), "old config").unwrap();

        let outcome = copy_file(
            &source,
            &target_dir,
            ConflictPolicy::Skip,
            &RecordingReporter::new(),
        )
        .unwrap();

        assert!(matches!(outcome, InstallOutcome::Skipped { .. }));
        assert_eq!(
            std::fs::read_to_string(target_dir.join("CCAST_.cfg")).unwrap(),
            "old config"
        );
    }

    #[test]
    fn test_copy_fail_policy() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("CCAST_.cfg");
        std::fs::write(&source, "new config").unwrap();
        let target_dir = temp.path().join("Master_CFG");
        std::fs::create_dir_all(&target_dir).unwrap();
        std::fs::write(target_dir.join("CCAST_.cfg"), "old config").unwrap();

        let err = copy_file(
            &source,
            &target_dir,
            ConflictPolicy::Fail,
            &RecordingReporter::new(),
        )
        .unwrap_err();

        assert!(matches!(err, SetupError::ArtifactConflict { .. }));
        assert_eq!(
            std::fs::read_to_string(target_dir.join("CCAST_.cfg")).unwrap(),
            "old config"
        );
    }

    #[test]
    fn test_copy_creates_missing_target_dir() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("CCAST_.cfg");
        std::fs::write(&source, "config").unwrap();
        let target_dir = temp.path().join("Master_CFG");

        let outcome = copy_file(
            &source,
            &target_dir,
            ConflictPolicy::Overwrite,
            &RecordingReporter::new(),
        );

        assert!(outcome.is_ok());
        assert!(target_dir.join("CCAST_.cfg").is_file());
    }
}
