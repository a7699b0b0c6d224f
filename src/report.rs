//! Reporting interface for setup runs
//!
//! The orchestrator is handed a `Reporter` and writes every stage transition,
//! created path, installed artifact, warning and error to it. Production wires
//! `TracingReporter`; tests wire `RecordingReporter` to assert on events
//! without parsing log output.

use std::path::PathBuf;
use std::sync::Mutex;

use crate::orchestrator::{ErrorRecord, SetupStatus, Stage};

/// One observable step of a setup run
#[derive(Debug, Clone, PartialEq)]
pub enum SetupEvent {
    StageEntered { stage: Stage },
    DirectoryCreated { path: PathBuf },
    DirectoryExisting { path: PathBuf },
    ArtifactStarted { description: String },
    ArtifactInstalled { description: String, path: PathBuf },
    ArtifactSkipped { description: String, path: PathBuf },
    OverwriteWarning { path: PathBuf },
    ErrorRecorded { record: ErrorRecord },
    RunFinished { status: SetupStatus },
}

/// Write-only sink for setup events
pub trait Reporter {
    fn event(&self, event: &SetupEvent);
}

/// Forwards events to the tracing subscriber (console and log file)
#[derive(Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn event(&self, event: &SetupEvent) {
        match event {
            SetupEvent::StageEntered { stage } => {
                tracing::info!(stage = %stage, "entering stage");
            }
            SetupEvent::DirectoryCreated { path } => {
                tracing::info!(path = %path.display(), "created directory");
            }
            SetupEvent::DirectoryExisting { path } => {
                tracing::debug!(path = %path.display(), "directory already present");
            }
            SetupEvent::ArtifactStarted { description } => {
                tracing::debug!("installing {description}");
            }
            SetupEvent::ArtifactInstalled { description, path } => {
                tracing::info!(path = %path.display(), "installed {description}");
            }
            SetupEvent::ArtifactSkipped { description, path } => {
                tracing::warn!(path = %path.display(), "skipped {description}: target already exists");
            }
            SetupEvent::OverwriteWarning { path } => {
                tracing::warn!(path = %path.display(), "overwriting existing file");
            }
            SetupEvent::ErrorRecorded { record } => {
                tracing::error!(
                    stage = %record.stage,
                    path = %record.path.display(),
                    recoverable = record.recoverable,
                    "{}",
                    record.message
                );
            }
            SetupEvent::RunFinished { status } => {
                tracing::info!(status = %status, "setup finished");
            }
        }
    }
}

/// Captures events in memory for deterministic test assertions
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<SetupEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events seen so far
    pub fn events(&self) -> Vec<SetupEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// The sequence of stages entered
    pub fn stages(&self) -> Vec<Stage> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SetupEvent::StageEntered { stage } => Some(stage),
                _ => None,
            })
            .collect()
    }

    /// Error records in the order they were reported
    pub fn errors(&self) -> Vec<ErrorRecord> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SetupEvent::ErrorRecorded { record } => Some(record),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn event(&self, event: &SetupEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
