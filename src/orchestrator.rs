//! Setup run orchestration
//!
//! Sequences validation, layout building and artifact installation, owns the
//! `SetupResult`, and reports every step to the injected `Reporter`. The run
//! is strictly sequential; recoverable failures are recorded and the run
//! continues with the next independent unit of work.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::SetupError;
use crate::installer::{self, ConflictPolicy, InstallOutcome};
use crate::layout;
use crate::report::{Reporter, SetupEvent};
use crate::resolver;
use crate::toolchain::Toolchain;

/// Stages of a setup run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    Validating,
    BuildingLayout,
    InstallingArtifacts,
    Done,
    Aborted,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::Validating => "validating",
            Stage::BuildingLayout => "building-layout",
            Stage::InstallingArtifacts => "installing-artifacts",
            Stage::Done => "done",
            Stage::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// An error captured during a run; append-only
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRecord {
    pub stage: Stage,
    pub path: PathBuf,
    pub message: String,
    pub recoverable: bool,
}

impl ErrorRecord {
    pub fn new(stage: Stage, error: &SetupError) -> Self {
        Self {
            stage,
            path: PathBuf::from(error.subject_path()),
            message: error.to_string(),
            recoverable: error.is_recoverable(),
        }
    }
}

/// Final classification of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStatus {
    /// No errors recorded
    Success,
    /// Recoverable errors recorded; the layout is still usable
    Partial,
    /// Validation failed or the project root could not be created
    Failed,
}

impl SetupStatus {
    pub fn exit_code(self) -> i32 {
        match self {
            SetupStatus::Success => 0,
            SetupStatus::Partial => 1,
            SetupStatus::Failed => 2,
        }
    }
}

impl fmt::Display for SetupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SetupStatus::Success => "success",
            SetupStatus::Partial => "partial",
            SetupStatus::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Accumulated outcome of one run
#[derive(Debug, Default)]
pub struct SetupResult {
    pub created_dirs: Vec<PathBuf>,
    pub installed_artifacts: Vec<PathBuf>,
    pub errors: Vec<ErrorRecord>,
}

impl SetupResult {
    /// Success requires zero errors; any unrecoverable error means the run
    /// produced nothing usable.
    pub fn status(&self) -> SetupStatus {
        if self.errors.is_empty() {
            SetupStatus::Success
        } else if self.errors.iter().any(|e| !e.recoverable) {
            SetupStatus::Failed
        } else {
            SetupStatus::Partial
        }
    }
}

/// Per-run options
#[derive(Debug, Clone, Copy)]
pub struct SetupOptions {
    pub on_conflict: ConflictPolicy,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            on_conflict: ConflictPolicy::Overwrite,
        }
    }
}

/// Run the whole provisioning workflow once, start to finish.
///
/// Validation failures abort before any filesystem mutation. A project-root
/// creation failure aborts after recording. Everything else is recorded and
/// the run continues, so one bad artifact does not waste the rest.
pub fn run(
    destination_root: &str,
    project_name: &str,
    toolchain: &Toolchain,
    source_root: &Path,
    options: &SetupOptions,
    reporter: &dyn Reporter,
) -> SetupResult {
    let mut result = SetupResult::default();

    reporter.event(&SetupEvent::StageEntered { stage: Stage::Init });

    reporter.event(&SetupEvent::StageEntered {
        stage: Stage::Validating,
    });
    let request = match resolver::resolve(destination_root, project_name) {
        Ok(request) => request,
        Err(e) => {
            record(&mut result, reporter, Stage::Validating, &e);
            return abort(result, reporter);
        }
    };
    let project_root = request.project_root();

    reporter.event(&SetupEvent::StageEntered {
        stage: Stage::BuildingLayout,
    });
    let layout_report = match layout::build(&project_root, &toolchain.directories) {
        Ok(report) => report,
        Err(e) => {
            record(&mut result, reporter, Stage::BuildingLayout, &e);
            return abort(result, reporter);
        }
    };
    for path in layout_report.created {
        reporter.event(&SetupEvent::DirectoryCreated { path: path.clone() });
        result.created_dirs.push(path);
    }
    for path in layout_report.existing {
        reporter.event(&SetupEvent::DirectoryExisting { path });
    }
    for error in &layout_report.errors {
        record(&mut result, reporter, Stage::BuildingLayout, error);
    }

    reporter.event(&SetupEvent::StageEntered {
        stage: Stage::InstallingArtifacts,
    });
    for spec in &toolchain.artifacts {
        reporter.event(&SetupEvent::ArtifactStarted {
            description: spec.description.clone(),
        });
        match installer::install(spec, source_root, &project_root, options.on_conflict, reporter) {
            Ok(InstallOutcome::Installed { path, .. }) => {
                reporter.event(&SetupEvent::ArtifactInstalled {
                    description: spec.description.clone(),
                    path: path.clone(),
                });
                result.installed_artifacts.push(path);
            }
            Ok(InstallOutcome::Skipped { path }) => {
                reporter.event(&SetupEvent::ArtifactSkipped {
                    description: spec.description.clone(),
                    path,
                });
            }
            Err(e) => record(&mut result, reporter, Stage::InstallingArtifacts, &e),
        }
    }

    reporter.event(&SetupEvent::StageEntered { stage: Stage::Done });
    reporter.event(&SetupEvent::RunFinished {
        status: result.status(),
    });
    result
}

fn record(result: &mut SetupResult, reporter: &dyn Reporter, stage: Stage, error: &SetupError) {
    let record = ErrorRecord::new(stage, error);
    reporter.event(&SetupEvent::ErrorRecorded {
        record: record.clone(),
    });
    result.errors.push(record);
}

fn abort(result: SetupResult, reporter: &dyn Reporter) -> SetupResult {
    reporter.event(&SetupEvent::StageEntered {
        stage: Stage::Aborted,
    });
    reporter.event(&SetupEvent::RunFinished {
        status: result.status(),
    });
    result
}
