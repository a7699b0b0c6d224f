//! benchsetup - automated test bench provisioning
//!
//! Creates the standard project directory layout for VectorCAST unit-test
//! environments and populates it from a shared artifact location.

use clap::Parser;

mod cli;
mod commands;
mod error;
mod hash;
mod installer;
mod layout;
mod logging;
mod orchestrator;
mod progress;
mod prompt;
mod report;
mod resolver;
mod toolchain;
mod ui;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Setup(args) => {
            // Logging is only wired for the provisioning run itself
            if let Err(e) = logging::init(cli.log_file.as_deref(), cli.verbose) {
                eprintln!("Error: {e}");
                std::process::exit(2);
            }
            match commands::setup::run(args) {
                Ok(status) => status.exit_code(),
                Err(e) => {
                    eprintln!("Error: {e}");
                    2
                }
            }
        }
        Commands::Version => match commands::version::run() {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("Error: {e}");
                2
            }
        },
        Commands::Completions(args) => match commands::completions::run(args) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("Error: {e}");
                2
            }
        },
    };

    std::process::exit(exit_code);
}
