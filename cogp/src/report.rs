//! Per-path failures and the diagnostic record format.
//!
//! Every failure is written as one record: a message line, the offending
//! path, the system error description, each on its own line, followed by the
//! ASCII Record Separator (0x1E). A consumer reading the diagnostic stream
//! splits on that byte to recover individual records.

use std::fmt;
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use nix::errno::Errno;

/// Terminator of every diagnostic record.
pub const RECORD_SEPARATOR: u8 = 0x1E;

/// The operation that failed for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailedOperation {
    /// A directory could not be opened or listed during traversal.
    OpenDirectory,
    /// A directory entry could not be stat'ed during traversal.
    Access,
    /// `chown` failed.
    ChangeOwner,
    /// `chmod` failed.
    ChangeMode,
}

impl FailedOperation {
    /// Returns the human-readable message that opens a record.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::OpenDirectory => "Failed to open directory",
            Self::Access => "Failed to access",
            Self::ChangeOwner => "Failed to change owner or group for",
            Self::ChangeMode => "Failed to change permissions for",
        }
    }
}

impl fmt::Display for FailedOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A non-fatal failure of one operation on one path.
#[derive(Debug)]
pub struct Failure {
    /// What was being attempted.
    pub operation: FailedOperation,
    /// The path concerned.
    pub path: PathBuf,
    /// The underlying system error.
    pub error: io::Error,
}

impl Failure {
    /// Creates a new failure.
    #[must_use]
    pub fn new(operation: FailedOperation, path: impl Into<PathBuf>, error: io::Error) -> Self {
        Self {
            operation,
            path: path.into(),
            error,
        }
    }

    /// Returns the path concerned.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the system's description of the error, without the
    /// "(os error N)" suffix that `io::Error` adds.
    ///
    /// # Examples
    ///
    /// ```
    /// use cogp::report::{FailedOperation, Failure};
    /// use std::io;
    ///
    /// let failure = Failure::new(
    ///     FailedOperation::ChangeMode,
    ///     "/missing",
    ///     io::Error::from_raw_os_error(2),
    /// );
    /// assert_eq!(failure.error_text(), "No such file or directory");
    /// ```
    #[must_use]
    pub fn error_text(&self) -> String {
        match self.error.raw_os_error() {
            Some(code) => Errno::from_raw(code).desc().to_string(),
            None => self.error.to_string(),
        }
    }

    /// Writes this failure as one RS-terminated record.
    ///
    /// The path is written as raw bytes so that non-UTF-8 names survive.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_record<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.operation.message().as_bytes())?;
        out.write_all(b":\n")?;
        out.write_all(self.path.as_os_str().as_bytes())?;
        out.write_all(b"\n")?;
        out.write_all(self.error_text().as_bytes())?;
        out.write_all(&[b'\n', RECORD_SEPARATOR])
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {}",
            self.operation,
            self.path.display(),
            self.error_text()
        )
    }
}

/// Writes a free-form message as one RS-terminated record.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_message_record<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    out.write_all(message.as_bytes())?;
    out.write_all(&[b'\n', RECORD_SEPARATOR])
}

/// Writes every failure as a record, in order.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_records<'a, W, I>(out: &mut W, failures: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Failure>,
{
    for failure in failures {
        failure.write_record(out)?;
    }
    out.flush()
}
