//! Error types for the cogp library.
//!
//! This module provides the error hierarchy for the validation and
//! path-loading phases, using `thiserror` for ergonomic error handling.
//! Failures of individual filesystem operations are not errors in this
//! sense; they are reported as [`crate::report::Failure`] values so that a
//! single bad path never aborts a run.

use thiserror::Error;

/// Result type alias for operations that may fail with a cogp error.
///
/// # Examples
///
/// ```
/// use cogp::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(0o755)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the cogp library.
///
/// Every variant is fatal: it is raised before any filesystem mutation has
/// taken place.
#[derive(Debug, Error)]
pub enum Error {
    /// The owner name is not present in the user database.
    #[error("invalid owner name: {name}")]
    UnknownUser {
        /// The name that could not be resolved.
        name: String,
    },

    /// The group name is not present in the group database.
    #[error("invalid group name: {name}")]
    UnknownGroup {
        /// The name that could not be resolved.
        name: String,
    },

    /// Looking a name up in the identity database failed outright.
    #[error("failed to look up '{name}': {source}")]
    IdentityLookup {
        /// The user or group name being looked up.
        name: String,
        /// The underlying system error.
        #[source]
        source: nix::errno::Errno,
    },

    /// The permissions argument is not one of the accepted forms.
    #[error("invalid permissions argument '{value}'")]
    InvalidPermissions {
        /// The rejected permissions string.
        value: String,
    },

    /// Owner, group and permissions were all left unchanged.
    #[error("nothing to change: owner, group and permissions are all \"/\"")]
    NothingToChange,

    /// The path list could not be read.
    #[error("failed to read paths from {origin}: {source}")]
    PathListRead {
        /// Where the paths were being read from.
        origin: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The path list was read successfully but contained no bytes.
    #[error("no paths in {origin}")]
    EmptyPathList {
        /// Where the paths were being read from.
        origin: String,
    },
}

impl Error {
    /// Check if the error came from loading the path list.
    ///
    /// # Examples
    ///
    /// ```
    /// use cogp::Error;
    ///
    /// let err = Error::EmptyPathList { origin: "stdin".to_string() };
    /// assert!(err.is_path_loading());
    /// assert!(!Error::NothingToChange.is_path_loading());
    /// ```
    #[must_use]
    pub fn is_path_loading(&self) -> bool {
        matches!(self, Self::PathListRead { .. } | Self::EmptyPathList { .. })
    }

    /// Build the error for a list file or stream that failed to read.
    pub(crate) fn path_list_read(origin: impl Into<String>, source: std::io::Error) -> Self {
        Self::PathListRead {
            origin: origin.into(),
            source,
        }
    }

    /// Build the error for a rejected permissions string.
    pub(crate) fn invalid_permissions(value: &str) -> Self {
        Self::InvalidPermissions {
            value: value.to_string(),
        }
    }
}
