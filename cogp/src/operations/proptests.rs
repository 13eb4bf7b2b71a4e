//! Property-based tests for plans and their execution.

use super::{ChangePlan, PlanExecutor};
use crate::apply::{MockFileOps, RecordedCall};
use crate::config::ChangeSet;
use crate::mode::{Mode, ModeChange};
use nix::errno::Errno;
use nix::unistd::{Gid, Uid};
use proptest::prelude::*;
use std::path::PathBuf;

fn targets() -> impl Strategy<Value = Vec<PathBuf>> {
    prop::collection::vec("[a-z]{1,6}", 0..30)
        .prop_map(|names| names.into_iter().map(|n| PathBuf::from(format!("/{n}"))).collect())
}

fn changes() -> impl Strategy<Value = ChangeSet> {
    (
        prop::option::of(0u32..70000),
        prop::option::of(0u32..70000),
        prop::option::of(0u32..=Mode::MAX),
    )
        .prop_map(|(owner, group, bits)| {
            let mode = match bits.and_then(Mode::from_bits) {
                Some(mode) => ModeChange::Set(mode),
                None => ModeChange::Unchanged,
            };
            ChangeSet::new(owner.map(Uid::from_raw), group.map(Gid::from_raw), mode)
        })
}

fn call_path(call: &RecordedCall) -> &PathBuf {
    match call {
        RecordedCall::Chown(path, _, _) | RecordedCall::Chmod(path, _) => path,
    }
}

proptest! {
    // One chown and/or one chmod per target occurrence, duplicates included
    #[test]
    fn operation_count(targets in targets(), changes in changes()) {
        let per_target = usize::from(changes.changes_ownership())
            + usize::from(!changes.mode.is_unchanged());
        let plan = ChangePlan::from_paths(targets.clone(), false, changes);
        let ops = MockFileOps::new();
        let result = PlanExecutor::new(&ops).execute(&plan);

        prop_assert_eq!(result.report.attempted(), targets.len() * per_target);
        prop_assert_eq!(plan.actions().len(), targets.len() * per_target);
    }

    // Calls visit the targets in exactly reverse order
    #[test]
    fn calls_in_reverse_order(targets in targets(), changes in changes()) {
        prop_assume!(!changes.is_empty());
        let plan = ChangePlan::from_paths(targets.clone(), false, changes);
        let ops = MockFileOps::new();
        PlanExecutor::new(&ops).execute(&plan);

        let mut visited: Vec<PathBuf> = ops.calls().iter().map(call_path).cloned().collect();
        visited.dedup();
        let mut expected = targets;
        expected.reverse();
        expected.dedup();
        prop_assert_eq!(visited, expected);
    }

    // A failing path never stops the others from being attempted
    #[test]
    fn failures_are_isolated(targets in targets(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!targets.is_empty());
        let bad = targets[pick.index(targets.len())].clone();
        let changes = ChangeSet::new(None, None, ModeChange::Set(Mode::from_bits(0o600).unwrap()));

        let plan = ChangePlan::from_paths(targets.clone(), false, changes);
        let ops = MockFileOps::new().fail_on(bad.clone(), Errno::EACCES);
        let result = PlanExecutor::new(&ops).execute(&plan);

        let occurrences = targets.iter().filter(|p| **p == bad).count();
        prop_assert_eq!(result.report.attempted(), targets.len());
        prop_assert_eq!(result.failed(), occurrences);
    }

    // Dry runs describe every action and make no calls
    #[test]
    fn dry_run_makes_no_calls(targets in targets(), changes in changes()) {
        let plan = ChangePlan::from_paths(targets, false, changes);
        let ops = MockFileOps::new();
        let result = PlanExecutor::new(&ops).dry_run().execute(&plan);

        prop_assert!(ops.calls().is_empty());
        prop_assert_eq!(result.planned.len(), plan.actions().len());
    }
}
