//! Main entry point for the cogp CLI.
//!
//! `cogp` changes the owner, group and permissions of a set of paths given
//! as arguments, in a NUL-separated list file, or on stdin, optionally
//! recursing into directories.

mod cli;
mod commands;
mod error;
mod utils;

use clap::error::ErrorKind;
use clap::Parser;
use cli::Cli;
use error::CliError;
use utils::{report_fatal, GlobalOptions};

fn main() {
    // Parse CLI arguments; usage errors exit with 1 like every fatal error
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            ErrorKind::MissingRequiredArgument => {
                let err = CliError::InvalidArguments(
                    "Missing arguments.\nUse -h or --help to display help.".to_string(),
                );
                report_fatal(&err);
                std::process::exit(err.exit_code());
            }
            _ => {
                let _ = e.print();
                std::process::exit(1);
            }
        },
    };

    // Initialize logging based on verbosity
    let logger = cogp::init_logger(cli.verbose, cli.quiet);
    if let Err(e) = logger.install() {
        logger.warn(&format!("could not install logger: {e}"));
    }

    let global = GlobalOptions { logger };

    // Execute the command
    match cli.apply.execute(&global) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            report_fatal(&e);
            std::process::exit(e.exit_code());
        }
    }
}
