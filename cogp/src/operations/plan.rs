//! Plan types for change operations.
//!
//! A plan is the fully expanded target list together with the changes to
//! apply. Building one reads the path source and walks directories but
//! modifies nothing, so a plan can be inspected (dry run) before it is
//! executed.

use std::path::PathBuf;

use crate::apply::actions;
use crate::config::{ChangeSet, RunConfig};
use crate::error::Result;
use crate::report::Failure;
use crate::traversal::expand;

pub use crate::apply::PlanAction;

/// A complete change plan.
#[derive(Debug)]
pub struct ChangePlan {
    /// The changes to apply to every target.
    pub changes: ChangeSet,
    /// Targets in discovery order (parents before their children).
    pub targets: Vec<PathBuf>,
    /// Failures met while expanding directories.
    pub traversal_failures: Vec<Failure>,
}

impl ChangePlan {
    /// Load the configured paths and expand them into a plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the path source cannot be loaded. Failures met
    /// while walking directories are not errors; they are kept in
    /// [`ChangePlan::traversal_failures`].
    pub fn build(config: RunConfig) -> Result<Self> {
        let paths = config.source.load()?;
        Ok(Self::from_paths(paths, config.recursive, config.changes))
    }

    /// Expand an already-loaded path list into a plan.
    #[must_use]
    pub fn from_paths(paths: Vec<PathBuf>, recursive: bool, changes: ChangeSet) -> Self {
        let expansion = expand(paths, recursive);
        Self {
            changes,
            targets: expansion.targets,
            traversal_failures: expansion.failures,
        }
    }

    /// The actions this plan performs, in the order they are performed.
    ///
    /// # Examples
    ///
    /// ```
    /// use cogp::operations::{ChangePlan, PlanAction};
    /// use cogp::{ChangeSet, ModeChange};
    /// use std::path::PathBuf;
    ///
    /// let changes = ChangeSet::new(None, None, ModeChange::parse("600").unwrap());
    /// let plan = ChangePlan::from_paths(
    ///     vec![PathBuf::from("/a"), PathBuf::from("/b")],
    ///     false,
    ///     changes,
    /// );
    ///
    /// let described: Vec<String> = plan.actions().iter().map(PlanAction::description).collect();
    /// assert_eq!(described, vec!["chmod 0600 /b", "chmod 0600 /a"]);
    /// ```
    #[must_use]
    pub fn actions(&self) -> Vec<PlanAction<'_>> {
        actions(&self.targets, &self.changes).collect()
    }

    /// Checks if the plan has no targets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Returns the number of targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }
}
