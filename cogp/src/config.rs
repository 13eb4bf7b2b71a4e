//! Run configuration: what to change, where, and how.
//!
//! Every argument is validated here, before any path is loaded and long
//! before anything is modified. The checks run in a fixed order: owner,
//! group, permissions, then whether anything is left to change at all.
//!
//! # Examples
//!
//! ```
//! use cogp::config::{ChangeSet, RunConfig};
//! use cogp::identity::MockIdentityResolver;
//! use cogp::source::PathSource;
//! use std::path::PathBuf;
//!
//! let resolver = MockIdentityResolver::new().with_user("alice", 1000);
//! let changes = ChangeSet::resolve("alice", "/", "rwxr-x---", &resolver).unwrap();
//!
//! let config = RunConfig::builder(changes)
//!     .recursive(true)
//!     .source(PathSource::Arguments(vec![PathBuf::from("/srv/data")]))
//!     .build();
//!
//! assert!(config.recursive);
//! assert!(!config.dry_run);
//! ```

use nix::unistd::{Gid, Uid};

use crate::error::{Error, Result};
use crate::identity::IdentityResolver;
use crate::mode::ModeChange;
use crate::source::PathSource;

/// The argument value meaning "leave this unchanged".
pub const UNCHANGED: &str = "/";

/// The validated set of changes to apply to every target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeSet {
    /// New owner, or `None` to leave the owner as is.
    pub owner: Option<Uid>,
    /// New group, or `None` to leave the group as is.
    pub group: Option<Gid>,
    /// New permission bits.
    pub mode: ModeChange,
}

impl ChangeSet {
    /// Creates a change set from already-resolved values.
    #[must_use]
    pub const fn new(owner: Option<Uid>, group: Option<Gid>, mode: ModeChange) -> Self {
        Self { owner, group, mode }
    }

    /// Validate and resolve the owner, group and permissions arguments.
    ///
    /// # Errors
    ///
    /// Returns, in order of checking:
    /// - [`Error::UnknownUser`] / [`Error::UnknownGroup`] if a name does not
    ///   resolve, or [`Error::IdentityLookup`] if the lookup fails
    /// - [`Error::InvalidPermissions`] if the permissions do not parse
    /// - [`Error::NothingToChange`] if all three are `"/"`
    pub fn resolve<R>(owner: &str, group: &str, permissions: &str, resolver: &R) -> Result<Self>
    where
        R: IdentityResolver + ?Sized,
    {
        let owner = if owner == UNCHANGED {
            None
        } else {
            let uid = resolver
                .resolve_user(owner)?
                .ok_or_else(|| Error::UnknownUser {
                    name: owner.to_string(),
                })?;
            Some(uid)
        };

        let group = if group == UNCHANGED {
            None
        } else {
            let gid = resolver
                .resolve_group(group)?
                .ok_or_else(|| Error::UnknownGroup {
                    name: group.to_string(),
                })?;
            Some(gid)
        };

        let changes = Self::new(owner, group, ModeChange::parse(permissions)?);
        if changes.is_empty() {
            return Err(Error::NothingToChange);
        }
        Ok(changes)
    }

    /// Returns `true` if owner and/or group are changed.
    #[must_use]
    pub const fn changes_ownership(&self) -> bool {
        self.owner.is_some() || self.group.is_some()
    }

    /// Returns `true` if nothing at all is changed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.changes_ownership() && self.mode.is_unchanged()
    }
}

/// Complete configuration of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Where the initial paths come from.
    pub source: PathSource,
    /// Expand directories into their descendants.
    pub recursive: bool,
    /// Plan only; modify nothing.
    pub dry_run: bool,
    /// What to change.
    pub changes: ChangeSet,
}

impl RunConfig {
    /// Start building a configuration for `changes`.
    ///
    /// Defaults: paths from standard input, not recursive, not a dry run.
    #[must_use]
    pub fn builder(changes: ChangeSet) -> RunConfigBuilder {
        RunConfigBuilder {
            config: Self {
                source: PathSource::Stdin,
                recursive: false,
                dry_run: false,
                changes,
            },
        }
    }
}

/// Builder for [`RunConfig`].
#[derive(Debug, Clone)]
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    /// Set where the initial paths come from.
    #[must_use]
    pub fn source(mut self, source: PathSource) -> Self {
        self.config.source = source;
        self
    }

    /// Enable or disable recursive expansion.
    #[must_use]
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.config.recursive = recursive;
        self
    }

    /// Enable or disable dry-run mode.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.config.dry_run = dry_run;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> RunConfig {
        self.config
    }
}
