//! Terminal output: the CLI reporter and the final summary

use console::Style;

use crate::orchestrator::{SetupResult, SetupStatus, Stage};
use crate::progress::ProgressDisplay;
use crate::report::{Reporter, SetupEvent, TracingReporter};
use crate::resolver::SetupRequest;
use crate::toolchain::{ArtifactKind, Toolchain};

/// Reporter wired for an interactive run: forwards everything to tracing and
/// drives the artifact progress bar.
pub struct CliReporter {
    tracing: TracingReporter,
    progress: ProgressDisplay,
}

impl CliReporter {
    pub fn new(total_artifacts: u64) -> Self {
        Self {
            tracing: TracingReporter,
            progress: ProgressDisplay::new(total_artifacts),
        }
    }
}

impl Reporter for CliReporter {
    fn event(&self, event: &SetupEvent) {
        self.tracing.event(event);

        match event {
            SetupEvent::ArtifactStarted { description } => {
                self.progress.update_artifact(description);
            }
            SetupEvent::ArtifactInstalled { .. } | SetupEvent::ArtifactSkipped { .. } => {
                self.progress.inc();
            }
            SetupEvent::ErrorRecorded { record } if record.stage == Stage::InstallingArtifacts => {
                self.progress.inc();
            }
            SetupEvent::RunFinished { status } => {
                if *status == SetupStatus::Failed {
                    self.progress.abandon();
                } else {
                    self.progress.finish();
                }
            }
            _ => {}
        }
    }
}

/// Print the end-of-run summary
pub fn print_summary(result: &SetupResult) {
    let bold = Style::new().bold();

    println!();
    println!("{}", bold.apply_to("Created directories:"));
    if result.created_dirs.is_empty() {
        println!("  {}", Style::new().dim().apply_to("none (already present)"));
    }
    for path in &result.created_dirs {
        println!("  {}", path.display());
    }

    println!("{}", bold.apply_to("Installed artifacts:"));
    if result.installed_artifacts.is_empty() {
        println!("  {}", Style::new().dim().apply_to("none"));
    }
    for path in &result.installed_artifacts {
        println!("  {}", path.display());
    }

    if !result.errors.is_empty() {
        println!("{}", bold.apply_to("Errors:"));
        for record in &result.errors {
            println!(
                "  {} [{}] {}",
                Style::new().red().apply_to("✗"),
                record.stage,
                record.message
            );
        }
    }

    let status = result.status();
    let styled = match status {
        SetupStatus::Success => Style::new().green().bold().apply_to("success"),
        SetupStatus::Partial => Style::new().yellow().bold().apply_to("partial"),
        SetupStatus::Failed => Style::new().red().bold().apply_to("failed"),
    };
    println!();
    println!("{} {}", bold.apply_to("Setup result:"), styled);
}

/// Print the dry-run plan without touching the filesystem
pub fn print_plan(request: &SetupRequest, toolchain: &Toolchain, source_root: &std::path::Path) {
    let bold = Style::new().bold();

    println!(
        "{} {}",
        bold.apply_to("Toolchain:"),
        Style::new().cyan().apply_to(&toolchain.name)
    );
    println!(
        "{} {}",
        bold.apply_to("Project root:"),
        request.project_root().display()
    );
    println!(
        "{} {}",
        bold.apply_to("Source location:"),
        source_root.display()
    );

    println!("{}", bold.apply_to("Directories:"));
    for dir in &toolchain.directories {
        println!("  {}", dir);
    }

    println!("{}", bold.apply_to("Artifacts:"));
    for artifact in &toolchain.artifacts {
        let kind = match artifact.kind {
            ArtifactKind::Archive => "extract",
            ArtifactKind::File => "copy",
        };
        println!(
            "  {} {} {} {}",
            kind,
            artifact.file_name,
            Style::new().dim().apply_to("->"),
            artifact.target_subdir
        );
    }
}
