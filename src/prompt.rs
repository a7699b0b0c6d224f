//! Interactive input adapter
//!
//! Thin wrapper over inquire so the orchestrator's entry point only ever
//! sees plain values. Only `setup` without positional arguments uses this.

use inquire::Text;

use crate::error::{Result, SetupError};

fn prompt_failed(e: inquire::InquireError) -> SetupError {
    SetupError::PromptFailed {
        reason: e.to_string(),
    }
}

/// Ask for the destination folder path
pub fn destination_root() -> Result<String> {
    Text::new("Enter the destination folder path:")
        .with_help_message("An existing folder the project directory will be created in")
        .prompt()
        .map(|s| s.trim().to_string())
        .map_err(prompt_failed)
}

/// Ask for the project name
pub fn project_name() -> Result<String> {
    Text::new("Enter the project name:")
        .with_help_message("A single folder name, e.g. DemoProj")
        .prompt()
        .map(|s| s.trim().to_string())
        .map_err(prompt_failed)
}
