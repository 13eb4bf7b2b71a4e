//! User and group name resolution.
//!
//! Owner and group arguments are names; the system calls want numeric ids.
//! The lookup sits behind a trait so that the validation phase can be
//! exercised without depending on the host's user database.

use std::collections::HashMap;

use nix::unistd::{Gid, Group, Uid, User};

use crate::error::{Error, Result};

/// Trait for looking up user and group names.
///
/// `Ok(None)` means the name is not present in the database; `Err` means the
/// lookup itself failed.
///
/// # Examples
///
/// ```no_run
/// use cogp::identity::{IdentityResolver, SystemIdentityResolver};
///
/// let resolver = SystemIdentityResolver;
/// let root = resolver.resolve_user("root").unwrap();
/// assert_eq!(root.map(|uid| uid.as_raw()), Some(0));
/// ```
pub trait IdentityResolver {
    /// Resolve a user name to its uid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IdentityLookup`] if the user database cannot be read.
    fn resolve_user(&self, name: &str) -> Result<Option<Uid>>;

    /// Resolve a group name to its gid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IdentityLookup`] if the group database cannot be read.
    fn resolve_group(&self, name: &str) -> Result<Option<Gid>>;
}

/// Resolver backed by the platform identity database (`getpwnam`/`getgrnam`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemIdentityResolver;

impl IdentityResolver for SystemIdentityResolver {
    fn resolve_user(&self, name: &str) -> Result<Option<Uid>> {
        let user = User::from_name(name).map_err(|source| Error::IdentityLookup {
            name: name.to_string(),
            source,
        })?;
        Ok(user.map(|user| user.uid))
    }

    fn resolve_group(&self, name: &str) -> Result<Option<Gid>> {
        let group = Group::from_name(name).map_err(|source| Error::IdentityLookup {
            name: name.to_string(),
            source,
        })?;
        Ok(group.map(|group| group.gid))
    }
}

/// Mock resolver with a fixed table of names.
///
/// # Examples
///
/// ```
/// use cogp::identity::{IdentityResolver, MockIdentityResolver};
///
/// let resolver = MockIdentityResolver::new()
///     .with_user("alice", 1000)
///     .with_group("staff", 50);
///
/// assert_eq!(resolver.resolve_user("alice").unwrap().unwrap().as_raw(), 1000);
/// assert!(resolver.resolve_user("bob").unwrap().is_none());
/// assert_eq!(resolver.resolve_group("staff").unwrap().unwrap().as_raw(), 50);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockIdentityResolver {
    users: HashMap<String, u32>,
    groups: HashMap<String, u32>,
}

impl MockIdentityResolver {
    /// Create an empty mock resolver (every lookup is not-found).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user to the table.
    #[must_use]
    pub fn with_user(mut self, name: &str, uid: u32) -> Self {
        self.users.insert(name.to_string(), uid);
        self
    }

    /// Add a group to the table.
    #[must_use]
    pub fn with_group(mut self, name: &str, gid: u32) -> Self {
        self.groups.insert(name.to_string(), gid);
        self
    }
}

impl IdentityResolver for MockIdentityResolver {
    fn resolve_user(&self, name: &str) -> Result<Option<Uid>> {
        Ok(self.users.get(name).copied().map(Uid::from_raw))
    }

    fn resolve_group(&self, name: &str) -> Result<Option<Gid>> {
        Ok(self.groups.get(name).copied().map(Gid::from_raw))
    }
}
