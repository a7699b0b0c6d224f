//! Zip archive validation and all-or-nothing extraction
//!
//! Extraction is two-pass. Pass 1 reads every entry to the end without
//! writing anything: the zip crate verifies each entry's CRC-32 on a full
//! read, and any entry whose name cannot be resolved inside the target
//! directory is rejected as path traversal. Pass 2 writes; if it is
//! interrupted, everything written by this attempt is removed so the target
//! is left as it was.

use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::ZipArchive;

use crate::error::{Result, SetupError};
use crate::installer::{ConflictPolicy, InstallOutcome};
use crate::report::{Reporter, SetupEvent};

/// One validated archive entry
struct EntryPlan {
    relative: PathBuf,
    is_dir: bool,
}

/// Extract `archive_path` into `target_dir`, all entries or none.
pub fn extract(
    archive_path: &Path,
    target_dir: &Path,
    policy: ConflictPolicy,
    reporter: &dyn Reporter,
) -> Result<InstallOutcome> {
    let plans = validate(archive_path)?;

    let colliding: Vec<PathBuf> = plans
        .iter()
        .filter(|p| !p.is_dir)
        .map(|p| target_dir.join(&p.relative))
        .filter(|p| p.exists())
        .collect();

    if !colliding.is_empty() {
        match policy {
            ConflictPolicy::Fail => {
                return Err(SetupError::ArtifactConflict {
                    path: colliding[0].display().to_string(),
                });
            }
            ConflictPolicy::Skip => {
                return Ok(InstallOutcome::Skipped {
                    path: target_dir.to_path_buf(),
                });
            }
            ConflictPolicy::Overwrite => {
                for path in &colliding {
                    reporter.event(&SetupEvent::OverwriteWarning { path: path.clone() });
                }
            }
        }
    }

    let mut written: Vec<PathBuf> = Vec::new();
    if let Err(e) = write_entries(archive_path, target_dir, &mut written) {
        remove_written(&written);
        return Err(e);
    }

    verify_extracted(&plans, target_dir)?;

    let entries = plans.iter().filter(|p| !p.is_dir).count();
    Ok(InstallOutcome::Installed {
        path: target_dir.to_path_buf(),
        entries,
    })
}

/// Pass 1: structural integrity and traversal safety, no writes.
fn validate(archive_path: &Path) -> Result<Vec<EntryPlan>> {
    let corrupt = |reason: String| SetupError::CorruptArchive {
        path: archive_path.display().to_string(),
        reason,
    };

    let file = File::open(archive_path).map_err(|e| SetupError::SourceUnavailable {
        path: archive_path.display().to_string(),
        reason: e.to_string(),
    })?;
    let mut archive = ZipArchive::new(file).map_err(|e| corrupt(e.to_string()))?;

    let mut plans = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| corrupt(e.to_string()))?;
        let raw_name = entry.name().to_string();

        let Some(relative) = entry.enclosed_name() else {
            return Err(SetupError::PathTraversal {
                archive: archive_path.display().to_string(),
                entry: raw_name,
            });
        };

        let is_dir = entry.is_dir();
        if !is_dir {
            // Full read verifies the entry's CRC-32
            std::io::copy(&mut entry, &mut std::io::sink())
                .map_err(|e| corrupt(format!("entry '{raw_name}': {e}")))?;
        }

        plans.push(EntryPlan { relative, is_dir });
    }

    Ok(plans)
}

/// Pass 2: write entries into the target. Paths newly created by this attempt
/// are appended to `written` so the caller can undo on failure.
fn write_entries(archive_path: &Path, target_dir: &Path, written: &mut Vec<PathBuf>) -> Result<()> {
    let failed = |path: &Path, reason: String| SetupError::ExtractionFailed {
        path: path.display().to_string(),
        reason,
    };

    let file = File::open(archive_path).map_err(|e| failed(archive_path, e.to_string()))?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| failed(archive_path, e.to_string()))?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| failed(archive_path, e.to_string()))?;
        let Some(relative) = entry.enclosed_name() else {
            // Already rejected during validation
            return Err(SetupError::PathTraversal {
                archive: archive_path.display().to_string(),
                entry: entry.name().to_string(),
            });
        };

        let dest = target_dir.join(relative);
        if entry.is_dir() {
            std::fs::create_dir_all(&dest).map_err(|e| failed(&dest, e.to_string()))?;
            continue;
        }

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| failed(parent, e.to_string()))?;
        }

        let existed = dest.exists();
        let mut out = File::create(&dest).map_err(|e| failed(&dest, e.to_string()))?;
        std::io::copy(&mut entry, &mut out).map_err(|e| failed(&dest, e.to_string()))?;
        if !existed {
            written.push(dest);
        }
    }

    Ok(())
}

/// Best-effort undo of a partial pass 2.
fn remove_written(written: &[PathBuf]) {
    for path in written {
        let _ = std::fs::remove_file(path);
    }
}

/// Confirm every file entry landed on disk after extraction.
fn verify_extracted(plans: &[EntryPlan], target_dir: &Path) -> Result<()> {
    let on_disk: HashSet<PathBuf> = WalkDir::new(target_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .collect();

    for plan in plans.iter().filter(|p| !p.is_dir) {
        let expected = target_dir.join(&plan.relative);
        if !on_disk.contains(&expected) {
            return Err(SetupError::ExtractionFailed {
                path: expected.display().to_string(),
                reason: "entry missing after extraction".to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RecordingReporter;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        for (name, content) in entries {
            zip.start_file(name.to_string(), options).unwrap();
            zip.write_all(content).unwrap();
        }
        zip.finish().unwrap();
    }

    fn dir_entry_count(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_extract_success() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("src.zip");
        write_zip(
            &archive,
            &[
                ("module_a.c", b"int a;".as_slice()),
                ("include/module_a.h", b"extern int a;".as_slice()),
            ],
        );
        let target = temp.path().join("SourceCode");
        std::fs::create_dir_all(&target).unwrap();

        let outcome = extract(
            &archive,
            &target,
            ConflictPolicy::Overwrite,
            &RecordingReporter::new(),
        )
        .unwrap();

        assert_eq!(
            outcome,
            InstallOutcome::Installed {
                path: target.clone(),
                entries: 2
            }
        );
        assert_eq!(
            std::fs::read_to_string(target.join("module_a.c")).unwrap(),
            "int a;"
        );
        assert!(target.join("include/module_a.h").is_file());
    }

    #[test]
    fn test_extract_rejects_garbage_bytes() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("bad.zip");
        std::fs::write(&archive, b"this is not a zip archive").unwrap();
        let target = temp.path().join("SourceCode");
        std::fs::create_dir_all(&target).unwrap();

        let err = extract(
            &archive,
            &target,
            ConflictPolicy::Overwrite,
            &RecordingReporter::new(),
        )
        .unwrap_err();

        assert!(matches!(err, SetupError::CorruptArchive { .. }));
        assert_eq!(dir_entry_count(&target), 0);
    }

    #[test]
    fn test_extract_rejects_truncated_archive() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("truncated.zip");
        write_zip(&archive, &[("payload.bin", vec![0u8; 4096].as_slice())]);
        let bytes = std::fs::read(&archive).unwrap();
        std::fs::write(&archive, &bytes[..bytes.len() / 2]).unwrap();
        let target = temp.path().join("SourceCode");
        std::fs::create_dir_all(&target).unwrap();

        let err = extract(
            &archive,
            &target,
            ConflictPolicy::Overwrite,
            &RecordingReporter::new(),
        )
        .unwrap_err();

        assert!(matches!(err, SetupError::CorruptArchive { .. }));
        assert_eq!(dir_entry_count(&target), 0);
    }

    #[test]
    fn test_extract_rejects_traversal_entry() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("evil.zip");
        write_zip(
            &archive,
            &[
                ("fine.txt", b"ok".as_slice()),
                ("../evil.txt", b"escape".as_slice()),
            ],
        );
        let target = temp.path().join("SourceCode");
        std::fs::create_dir_all(&target).unwrap();

        let err = extract(
            &archive,
            &target,
            ConflictPolicy::Overwrite,
            &RecordingReporter::new(),
        )
        .unwrap_err();

        // Whole extraction rejected, nothing written anywhere
        assert!(matches!(err, SetupError::PathTraversal { .. }));
        assert_eq!(dir_entry_count(&target), 0);
        assert!(!temp.path().join("evil.txt").exists());
    }

    #[test]
    fn test_extract_conflict_fail_policy() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("src.zip");
        write_zip(&archive, &[("module_a.c", b"new".as_slice())]);
        let target = temp.path().join("SourceCode");
        std::fs::create_dir_all(&target).unwrap();
        std::fs::write(target.join("module_a.c"), "old").unwrap();

        let err = extract(
            &archive,
            &target,
            ConflictPolicy::Fail,
            &RecordingReporter::new(),
        )
        .unwrap_err();

        assert!(matches!(err, SetupError::ArtifactConflict { .. }));
        assert_eq!(
            std::fs::read_to_string(target.join("module_a.c")).unwrap(),
            "old"
        );
    }

    #[test]
    fn test_extract_conflict_skip_policy() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("src.zip");
        write_zip(&archive, &[("module_a.c", b"new".as_slice())]);
        let target = temp.path().join("SourceCode");
        std::fs::create_dir_all(&target).unwrap();
        std::fs::write(target.join("module_a.c"), "old").unwrap();

        let outcome = extract(
            &archive,
            &target,
            ConflictPolicy::Skip,
            &RecordingReporter::new(),
        )
        .unwrap();

        assert_eq!(
            outcome,
            InstallOutcome::Skipped {
                path: target.clone()
            }
        );
        assert_eq!(
            std::fs::read_to_string(target.join("module_a.c")).unwrap(),
            "old"
        );
    }

    #[test]
    fn test_extract_conflict_overwrite_warns() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("src.zip");
        write_zip(&archive, &[("module_a.c", b"new".as_slice())]);
        let target = temp.path().join("SourceCode");
        std::fs::create_dir_all(&target).unwrap();
        std::fs::write(target.join("module_a.c"), "old").unwrap();
        let reporter = RecordingReporter::new();

        extract(&archive, &target, ConflictPolicy::Overwrite, &reporter).unwrap();

        assert_eq!(
            std::fs::read_to_string(target.join("module_a.c")).unwrap(),
            "new"
        );
        assert!(reporter
            .events()
            .iter()
            .any(|e| matches!(e, SetupEvent::OverwriteWarning { .. })));
    }

    #[test]
    fn test_extract_with_directory_entries() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("launch.zip");
        let file = File::create(&archive).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        zip.add_directory("t32sim/", options).unwrap();
        zip.start_file("t32sim/launch.cmm", options).unwrap();
        zip.write_all(b"script").unwrap();
        zip.finish().unwrap();

        let target = temp.path().join("patch");
        std::fs::create_dir_all(&target).unwrap();

        let outcome = extract(
            &archive,
            &target,
            ConflictPolicy::Overwrite,
            &RecordingReporter::new(),
        )
        .unwrap();

        assert_eq!(
            outcome,
            InstallOutcome::Installed {
                path: target.clone(),
                entries: 1
            }
        );
        assert!(target.join("t32sim/launch.cmm").is_file());
    }
}
