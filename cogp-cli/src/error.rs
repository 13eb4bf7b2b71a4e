//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use cogp::Error as LibError;
use std::fmt;

/// Accepted permission forms, listed after an invalid permissions error.
const PERMISSION_FORMS: &str = "\
Permissions must be one of:
  rwxrwxrwx (s/S allowed in owner and group execute, t/T in other execute)
  000-777
  0000-7777
  / (leave unchanged)";

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error writing output.
    Io(std::io::Error),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Every fatal error exits with 1. Failures on individual paths are not
    /// errors and leave the exit code at 0.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Library(_) | CliError::InvalidArguments(_) | CliError::Io(_) => 1,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e @ LibError::InvalidPermissions { .. }) => {
                write!(f, "{e}\n{PERMISSION_FORMS}")
            }
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "{msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::InvalidArguments(_) => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
