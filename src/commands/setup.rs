//! Setup command implementation
//!
//! Resolves inputs (arguments, then interactive prompts), loads the active
//! toolchain, and hands plain values to the orchestrator. The final status is
//! the process exit code: 0 success, 1 partial, 2 failed.

use std::path::PathBuf;

use crate::cli::SetupArgs;
use crate::error::{Result, SetupError};
use crate::orchestrator::{self, SetupOptions, SetupStatus};
use crate::prompt;
use crate::resolver;
use crate::toolchain::Toolchain;
use crate::ui::{self, CliReporter};

/// Run the setup command
pub fn run(args: SetupArgs) -> Result<SetupStatus> {
    let toolchain = Toolchain::load(args.toolchain.as_deref())?;

    let destination = match args.destination {
        Some(destination) => destination,
        None => prompt::destination_root()?,
    };
    let project_name = match args.project_name {
        Some(name) => name,
        None => prompt::project_name()?,
    };

    let source_root = resolve_source_dir(&args.source_dir, &toolchain)?;

    if args.dry_run {
        let request = resolver::resolve(&destination, &project_name)?;
        ui::print_plan(&request, &toolchain, &source_root);
        return Ok(SetupStatus::Success);
    }

    let reporter = CliReporter::new(toolchain.artifacts.len() as u64);
    let options = SetupOptions {
        on_conflict: args.on_conflict,
    };

    let result = orchestrator::run(
        &destination,
        &project_name,
        &toolchain,
        &source_root,
        &options,
        &reporter,
    );

    ui::print_summary(&result);
    Ok(result.status())
}

/// The shared source location: CLI flag (or env), then the toolchain default.
fn resolve_source_dir(flag: &Option<PathBuf>, toolchain: &Toolchain) -> Result<PathBuf> {
    flag.clone()
        .or_else(|| toolchain.source_dir.clone())
        .ok_or_else(|| SetupError::SourceUnavailable {
            path: "-".to_string(),
            reason: "no shared source location configured; pass --source-dir or set \
                     BENCHSETUP_SOURCE_DIR"
                .to_string(),
        })
}
