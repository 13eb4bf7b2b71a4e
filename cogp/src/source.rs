//! Where the initial target paths come from.
//!
//! Paths are taken verbatim from the command line, or read wholesale from a
//! list file or standard input and split on NUL bytes. Nothing is checked
//! here: a path that does not exist is passed through and fails later when
//! it is modified.

use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, Read};
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// The origin of the initial path sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSource {
    /// Paths given directly, e.g. as command-line arguments.
    Arguments(Vec<PathBuf>),
    /// A file holding NUL-separated paths.
    ListFile(PathBuf),
    /// NUL-separated paths on standard input.
    Stdin,
}

impl PathSource {
    /// Produce the initial path sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathListRead`] if the list file or standard input
    /// cannot be read, and [`Error::EmptyPathList`] if it holds no bytes.
    pub fn load(self) -> Result<Vec<PathBuf>> {
        match self {
            Self::Arguments(paths) => Ok(paths),
            Self::ListFile(list) => {
                let origin = format!("list file {}", list.display());
                let file = File::open(&list).map_err(|e| Error::path_list_read(&origin, e))?;
                read_paths(file, &origin)
            }
            Self::Stdin => read_paths(io::stdin().lock(), "stdin"),
        }
    }

    /// Returns a short description of the source, for log output.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Arguments(paths) => format!("{} argument path(s)", paths.len()),
            Self::ListFile(list) => format!("list file {}", list.display()),
            Self::Stdin => "stdin".to_string(),
        }
    }
}

/// Read all of `reader` and split it into paths.
///
/// # Errors
///
/// Returns [`Error::PathListRead`] if reading fails and
/// [`Error::EmptyPathList`] if the reader yields no bytes at all.
///
/// # Examples
///
/// ```
/// use cogp::source::read_paths;
/// use std::path::PathBuf;
///
/// let paths = read_paths(&b"/etc/hosts\0/tmp"[..], "example").unwrap();
/// assert_eq!(paths, vec![PathBuf::from("/etc/hosts"), PathBuf::from("/tmp")]);
///
/// assert!(read_paths(&b""[..], "example").is_err());
/// ```
pub fn read_paths<R: Read>(mut reader: R, origin: &str) -> Result<Vec<PathBuf>> {
    let mut buffer = Vec::with_capacity(64 * 1024);
    reader
        .read_to_end(&mut buffer)
        .map_err(|e| Error::path_list_read(origin, e))?;

    if buffer.is_empty() {
        return Err(Error::EmptyPathList {
            origin: origin.to_string(),
        });
    }

    Ok(split_paths(&buffer))
}

/// Split a buffer of NUL-separated paths.
///
/// The last path does not need a terminating NUL. Empty fragments between
/// two NULs are kept as empty paths.
///
/// # Examples
///
/// ```
/// use cogp::source::split_paths;
/// use std::path::PathBuf;
///
/// assert_eq!(split_paths(b"a\0b\0"), vec![PathBuf::from("a"), PathBuf::from("b")]);
/// assert_eq!(split_paths(b"a\0b"), vec![PathBuf::from("a"), PathBuf::from("b")]);
/// assert!(split_paths(b"").is_empty());
/// ```
#[must_use]
pub fn split_paths(buffer: &[u8]) -> Vec<PathBuf> {
    if buffer.is_empty() {
        return Vec::new();
    }

    let body = buffer.strip_suffix(&[0]).unwrap_or(buffer);
    body.split(|b| *b == 0)
        .map(|raw| PathBuf::from(OsStr::from_bytes(raw)))
        .collect()
}
