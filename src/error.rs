//! Error types and handling for benchsetup
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for benchsetup operations
#[derive(Error, Diagnostic, Debug)]
pub enum SetupError {
    // Input validation errors
    #[error("Destination root does not exist: {path}")]
    #[diagnostic(
        code(benchsetup::input::root_not_found),
        help("Check that the destination folder path is spelled correctly and mounted")
    )]
    RootNotFound { path: String },

    #[error("Destination root is not a directory: {path}")]
    #[diagnostic(code(benchsetup::input::root_not_a_directory))]
    RootNotADirectory { path: String },

    #[error("Destination root is not writable: {path}")]
    #[diagnostic(
        code(benchsetup::input::root_not_writable),
        help("Check permissions on the destination folder")
    )]
    RootNotWritable { path: String, reason: String },

    #[error("Invalid project name '{name}': {reason}")]
    #[diagnostic(
        code(benchsetup::input::invalid_project_name),
        help("Project names must be a single path segment without / \\ : * ? \" < > |")
    )]
    InvalidProjectName { name: String, reason: String },

    // Layout errors
    #[error("Failed to create project root: {path}")]
    #[diagnostic(code(benchsetup::layout::project_root_failed))]
    ProjectRootCreationFailed { path: String, reason: String },

    #[error("Failed to create directory: {path}")]
    #[diagnostic(code(benchsetup::layout::directory_failed))]
    DirectoryCreationFailed { path: String, reason: String },

    // Artifact errors
    #[error("Source artifact unavailable: {path}")]
    #[diagnostic(
        code(benchsetup::artifact::source_unavailable),
        help("Check that the shared source location is mounted and the file exists")
    )]
    SourceUnavailable { path: String, reason: String },

    #[error("Archive failed integrity check: {path}")]
    #[diagnostic(
        code(benchsetup::artifact::corrupt_archive),
        help("Re-fetch the archive from the shared source location")
    )]
    CorruptArchive { path: String, reason: String },

    #[error("Archive entry '{entry}' escapes the target directory (archive: {archive})")]
    #[diagnostic(code(benchsetup::artifact::path_traversal))]
    PathTraversal { archive: String, entry: String },

    #[error("Extraction failed: {path}")]
    #[diagnostic(code(benchsetup::artifact::extraction_failed))]
    ExtractionFailed { path: String, reason: String },

    #[error("Failed to copy file: {path}")]
    #[diagnostic(code(benchsetup::artifact::copy_failed))]
    FileCopyFailed { path: String, reason: String },

    #[error("Target already exists: {path}")]
    #[diagnostic(
        code(benchsetup::artifact::conflict),
        help("Re-run with --on-conflict overwrite or --on-conflict skip")
    )]
    ArtifactConflict { path: String },

    // Toolchain configuration errors
    #[error("Toolchain file not found: {path}")]
    #[diagnostic(code(benchsetup::toolchain::not_found))]
    ToolchainFileNotFound { path: String },

    #[error("Failed to parse toolchain file: {path}")]
    #[diagnostic(code(benchsetup::toolchain::parse_failed))]
    ToolchainParseFailed { path: String, reason: String },

    #[error("Invalid toolchain definition: {reason}")]
    #[diagnostic(code(benchsetup::toolchain::invalid))]
    ToolchainInvalid { reason: String },

    // Ambient errors
    #[error("Failed to read input: {reason}")]
    #[diagnostic(code(benchsetup::prompt::failed))]
    PromptFailed { reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(benchsetup::io::error))]
    Io { message: String },
}

impl SetupError {
    /// Whether the run can continue past this error.
    ///
    /// Per-directory and per-artifact failures are recoverable; input
    /// validation, project-root creation and toolchain loading are not.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SetupError::DirectoryCreationFailed { .. }
                | SetupError::SourceUnavailable { .. }
                | SetupError::CorruptArchive { .. }
                | SetupError::PathTraversal { .. }
                | SetupError::ExtractionFailed { .. }
                | SetupError::FileCopyFailed { .. }
                | SetupError::ArtifactConflict { .. }
        )
    }

    /// The path the error is about, for error records and log context.
    pub fn subject_path(&self) -> String {
        match self {
            SetupError::RootNotFound { path }
            | SetupError::RootNotADirectory { path }
            | SetupError::RootNotWritable { path, .. }
            | SetupError::ProjectRootCreationFailed { path, .. }
            | SetupError::DirectoryCreationFailed { path, .. }
            | SetupError::SourceUnavailable { path, .. }
            | SetupError::CorruptArchive { path, .. }
            | SetupError::ExtractionFailed { path, .. }
            | SetupError::FileCopyFailed { path, .. }
            | SetupError::ArtifactConflict { path }
            | SetupError::ToolchainFileNotFound { path }
            | SetupError::ToolchainParseFailed { path, .. } => path.clone(),
            SetupError::InvalidProjectName { name, .. } => name.clone(),
            SetupError::PathTraversal { archive, .. } => archive.clone(),
            SetupError::ToolchainInvalid { .. }
            | SetupError::PromptFailed { .. }
            | SetupError::Io { .. } => "-".to_string(),
        }
    }
}

impl From<std::io::Error> for SetupError {
    fn from(err: std::io::Error) -> Self {
        SetupError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SetupError>;
