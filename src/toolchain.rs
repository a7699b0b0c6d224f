//! Toolchain catalog: the directory plan and artifact table for a test bench
//!
//! The default toolchain is the Tasking TriCore TC297TA T32 simulator setup.
//! All fixed directory and artifact names live here as named constants so a
//! different toolchain can be substituted (via `--toolchain <file>`) without
//! touching orchestration logic.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SetupError};

/// Unit test working directory
pub const UNIT_TEST_DIR: &str = "VCAST_UT";
/// Simulator launch/patch directory
pub const PATCH_DIR: &str = "VectorCAST_patch_for_Tasking_Tricore_TC297TA_T32_Simulator";
/// Extracted source code directory
pub const SOURCE_CODE_DIR: &str = "SourceCode";
/// Master configuration directory
pub const CONFIG_DIR: &str = "Master_CFG";

/// Launch/patch archive on the shared source location
pub const LAUNCH_ARCHIVE: &str = "Launch_VC_Tricore_AURIX_TC23x_t32sim.zip";
/// Source code archive on the shared source location
pub const SOURCE_ARCHIVE: &str = "SourceCode.zip";
/// Master configuration file on the shared source location
pub const MASTER_CONFIG_FILE: &str = "CCAST_.cfg";

/// How a source artifact is placed into its target directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Zip archive, extracted into the target directory
    Archive,
    /// Plain file, copied verbatim into the target directory
    File,
}

/// One artifact to fetch from the shared source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSpec {
    pub kind: ArtifactKind,
    /// File name under the shared source location
    pub file_name: String,
    /// Target directory relative to the project root; must be part of the plan
    pub target_subdir: String,
    /// Human-readable description for logs and the summary
    pub description: String,
}

impl ArtifactSpec {
    /// Absolute path of the artifact under the shared source location
    pub fn source_path(&self, source_root: &Path) -> PathBuf {
        source_root.join(&self.file_name)
    }

    /// Absolute target directory under the project root
    pub fn target_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.target_subdir)
    }
}

/// A complete toolchain definition: directory plan plus artifact table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toolchain {
    pub name: String,
    /// Ordered subdirectories created under the project root
    pub directories: Vec<String>,
    /// Artifacts installed from the shared source location
    pub artifacts: Vec<ArtifactSpec>,
    /// Default shared source location; overridable per run
    #[serde(default)]
    pub source_dir: Option<PathBuf>,
}

impl Toolchain {
    /// Built-in toolchain for the Tasking TriCore TC297TA T32 simulator
    pub fn tricore_t32() -> Self {
        Self {
            name: "Tasking TriCore TC297TA T32 Simulator".to_string(),
            directories: vec![
                UNIT_TEST_DIR.to_string(),
                PATCH_DIR.to_string(),
                SOURCE_CODE_DIR.to_string(),
                CONFIG_DIR.to_string(),
            ],
            artifacts: vec![
                ArtifactSpec {
                    kind: ArtifactKind::Archive,
                    file_name: LAUNCH_ARCHIVE.to_string(),
                    target_subdir: PATCH_DIR.to_string(),
                    description: "VectorCAST launch package".to_string(),
                },
                ArtifactSpec {
                    kind: ArtifactKind::Archive,
                    file_name: SOURCE_ARCHIVE.to_string(),
                    target_subdir: SOURCE_CODE_DIR.to_string(),
                    description: "Source code package".to_string(),
                },
                ArtifactSpec {
                    kind: ArtifactKind::File,
                    file_name: MASTER_CONFIG_FILE.to_string(),
                    target_subdir: CONFIG_DIR.to_string(),
                    description: "Master configuration file".to_string(),
                },
            ],
            source_dir: None,
        }
    }

    /// Load a toolchain definition from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SetupError::ToolchainFileNotFound {
                path: path.display().to_string(),
            });
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| SetupError::ToolchainParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let toolchain: Toolchain =
            serde_yaml::from_str(&content).map_err(|e| SetupError::ToolchainParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        toolchain.validate()?;
        Ok(toolchain)
    }

    /// Per-user toolchain override, if one exists
    ///
    /// Looked up at `<config dir>/benchsetup/toolchain.yaml`.
    pub fn user_override_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("benchsetup").join("toolchain.yaml"))
    }

    /// Resolve the active toolchain: explicit file, then the per-user
    /// override, then the built-in default.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Some(user_path) = Self::user_override_path() {
            if user_path.exists() {
                return Self::from_file(&user_path);
            }
        }

        Ok(Self::tricore_t32())
    }

    /// Check internal consistency of the definition.
    ///
    /// Every artifact must target a directory that is part of the plan; the
    /// installer is only allowed to write under planned directories.
    pub fn validate(&self) -> Result<()> {
        if self.directories.is_empty() {
            return Err(SetupError::ToolchainInvalid {
                reason: "directory plan is empty".to_string(),
            });
        }

        for artifact in &self.artifacts {
            if artifact.file_name.trim().is_empty() {
                return Err(SetupError::ToolchainInvalid {
                    reason: format!("artifact for '{}' has no file name", artifact.target_subdir),
                });
            }
            if !self.directories.contains(&artifact.target_subdir) {
                return Err(SetupError::ToolchainInvalid {
                    reason: format!(
                        "artifact '{}' targets '{}' which is not in the directory plan",
                        artifact.file_name, artifact.target_subdir
                    ),
                });
            }
        }

        Ok(())
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::tricore_t32()
    }
}
