//! Utility functions for CLI operations.

use crate::error::CliError;
use cogp::report::{write_message_record, write_records};
use cogp::{Error, Failure, Logger};
use std::io::{self, Write};

/// Global CLI options shared by the command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Logger configured from `--verbose`, `--quiet` and `COGP_LOG_MODE`.
    pub logger: Logger,
}

/// Write failure records to stderr.
pub fn write_failures<'a, I>(failures: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = &'a Failure>,
{
    let stderr = io::stderr();
    write_records(&mut stderr.lock(), failures)?;
    Ok(())
}

/// Report a fatal error on stderr.
///
/// Path-loading errors use the same RS-terminated record format as
/// per-path failures; everything else is a plain `Error:` line.
pub fn report_fatal(error: &CliError) {
    let stderr = io::stderr();
    let mut err = stderr.lock();
    let _ = match error {
        CliError::Library(lib @ (Error::PathListRead { .. } | Error::EmptyPathList { .. })) => {
            write_message_record(&mut err, &format!("Error: {lib}"))
        }
        _ => writeln!(err, "Error: {error}"),
    };
}
