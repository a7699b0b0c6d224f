//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::installer::ConflictPolicy;

/// benchsetup - test bench provisioning
///
/// Provision standardized VectorCAST unit-test project layouts from a shared
/// artifact location.
#[derive(Parser, Debug)]
#[command(
    name = "benchsetup",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Automated test bench provisioning for VectorCAST unit testing",
    long_about = "benchsetup creates the standard project directory layout for VectorCAST \
                  unit-test environments (Tasking TriCore TC297TA T32 simulator by default) \
                  and populates it from a shared artifact location: the simulator launch \
                  package, the source code archive and the master configuration file.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  benchsetup setup /tmp/work DemoProj --source-dir /mnt/share\n    \
                  benchsetup setup                        (prompts for inputs)\n    \
                  benchsetup setup /tmp/work DemoProj --dry-run\n    \
                  benchsetup setup /tmp/work DemoProj --on-conflict skip\n    \
                  benchsetup completions bash"
)]
pub struct Cli {
    /// Write the run log to this file (defaults to benchsetup.log in the working directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision a test bench project
    Setup(SetupArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the setup command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Provision with explicit inputs:\n    benchsetup setup /tmp/work DemoProj --source-dir /mnt/share\n\n\
                  Prompt for destination and project name:\n    benchsetup setup --source-dir /mnt/share\n\n\
                  Preview without touching the filesystem:\n    benchsetup setup /tmp/work DemoProj --dry-run\n\n\
                  Keep pre-existing artifacts from an earlier run:\n    benchsetup setup /tmp/work DemoProj --on-conflict skip\n\n\
                  Use a different toolchain definition:\n    benchsetup setup /tmp/work DemoProj --toolchain ./tricore.yaml")]
pub struct SetupArgs {
    /// Destination folder the project directory is created in (prompted when omitted)
    pub destination: Option<String>,

    /// Project name (prompted when omitted)
    pub project_name: Option<String>,

    /// Shared source location holding the archives and the configuration file
    #[arg(long, env = "BENCHSETUP_SOURCE_DIR", value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Toolchain definition file (YAML); defaults to the built-in TriCore toolchain
    #[arg(long, value_name = "FILE")]
    pub toolchain: Option<PathBuf>,

    /// What to do when an artifact already exists at its target
    #[arg(long, value_enum, default_value_t = ConflictPolicy::Overwrite)]
    pub on_conflict: ConflictPolicy,

    /// Validate inputs and show the plan without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
