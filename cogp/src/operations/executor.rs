//! Plan execution.
//!
//! This module implements the executor that takes a change plan and applies
//! it to the filesystem through a [`FileOps`] implementation.

use crate::apply::{apply, ApplyReport, FileOps};

use super::plan::{ChangePlan, PlanAction};

/// Result of executing a plan.
#[derive(Debug, Default)]
pub struct ExecutionResult {
    /// Whether this was a dry run (nothing modified).
    pub dry_run: bool,

    /// Descriptions of the actions that would be taken (dry run only).
    pub planned: Vec<String>,

    /// Outcomes of the operations performed (empty for a dry run).
    pub report: ApplyReport,
}

impl ExecutionResult {
    /// Number of operations that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.report.failed()
    }
}

/// Executes change plans.
///
/// # Examples
///
/// ```
/// use cogp::apply::MockFileOps;
/// use cogp::operations::{ChangePlan, PlanExecutor};
/// use cogp::{ChangeSet, ModeChange};
/// use std::path::PathBuf;
///
/// let changes = ChangeSet::new(None, None, ModeChange::parse("644").unwrap());
/// let plan = ChangePlan::from_paths(vec![PathBuf::from("/a")], false, changes);
///
/// let ops = MockFileOps::new();
///
/// // Dry-run execution touches nothing
/// let result = PlanExecutor::new(&ops).dry_run().execute(&plan);
/// assert_eq!(result.planned, vec!["chmod 0644 /a"]);
/// assert!(ops.calls().is_empty());
///
/// // Normal execution
/// let result = PlanExecutor::new(&ops).execute(&plan);
/// assert_eq!(result.report.attempted(), 1);
/// assert_eq!(ops.calls().len(), 1);
/// ```
pub struct PlanExecutor<'a, F: FileOps + ?Sized> {
    ops: &'a F,
    dry_run: bool,
}

impl<'a, F: FileOps + ?Sized> PlanExecutor<'a, F> {
    /// Creates a new plan executor.
    #[must_use]
    pub const fn new(ops: &'a F) -> Self {
        Self { ops, dry_run: false }
    }

    /// Sets the executor to dry-run mode.
    ///
    /// In dry-run mode the executor only describes the plan's actions.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// Per-path failures are collected in the returned report; execution
    /// itself never fails.
    pub fn execute(&self, plan: &ChangePlan) -> ExecutionResult {
        if self.dry_run {
            return ExecutionResult {
                dry_run: true,
                planned: plan.actions().iter().map(PlanAction::description).collect(),
                report: ApplyReport::default(),
            };
        }

        ExecutionResult {
            dry_run: false,
            planned: Vec::new(),
            report: apply(&plan.targets, &plan.changes, self.ops),
        }
    }
}
