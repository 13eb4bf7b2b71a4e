//! Applying ownership and mode changes to the target list.
//!
//! The system calls sit behind the [`FileOps`] trait so that ordering and
//! failure handling can be tested without touching real files or needing
//! privileges.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::fs::{self, Permissions};
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use log::debug;
use nix::errno::Errno;
use nix::unistd::{Gid, Uid};

use crate::config::ChangeSet;
use crate::mode::Mode;
use crate::report::{FailedOperation, Failure};

/// One of the two modifications applied to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Change owner and/or group.
    ChangeOwner,
    /// Change permission bits.
    ChangeMode,
}

impl From<Operation> for FailedOperation {
    fn from(operation: Operation) -> Self {
        match operation {
            Operation::ChangeOwner => Self::ChangeOwner,
            Operation::ChangeMode => Self::ChangeMode,
        }
    }
}

/// A single modification of one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanAction<'a> {
    /// Change owner and/or group of a path.
    ChangeOwner {
        /// The target path.
        path: &'a Path,
        /// New owner, `None` to keep.
        owner: Option<Uid>,
        /// New group, `None` to keep.
        group: Option<Gid>,
    },
    /// Change the permission bits of a path.
    ChangeMode {
        /// The target path.
        path: &'a Path,
        /// The mode to set.
        mode: Mode,
    },
}

impl PlanAction<'_> {
    /// Returns a one-line description of this action.
    ///
    /// # Examples
    ///
    /// ```
    /// use cogp::operations::PlanAction;
    /// use cogp::Mode;
    /// use nix::unistd::Uid;
    /// use std::path::Path;
    ///
    /// let chown = PlanAction::ChangeOwner {
    ///     path: Path::new("/srv/a"),
    ///     owner: Some(Uid::from_raw(1000)),
    ///     group: None,
    /// };
    /// assert_eq!(chown.description(), "chown 1000 - /srv/a");
    ///
    /// let chmod = PlanAction::ChangeMode {
    ///     path: Path::new("/srv/a"),
    ///     mode: Mode::from_bits(0o750).unwrap(),
    /// };
    /// assert_eq!(chmod.description(), "chmod 0750 /srv/a");
    /// ```
    #[must_use]
    pub fn description(&self) -> String {
        self.to_string()
    }

    /// The operation this action performs.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::ChangeOwner { .. } => Operation::ChangeOwner,
            Self::ChangeMode { .. } => Operation::ChangeMode,
        }
    }

    /// The path this action modifies.
    #[must_use]
    pub const fn path(&self) -> &Path {
        match self {
            Self::ChangeOwner { path, .. } | Self::ChangeMode { path, .. } => *path,
        }
    }
}

impl fmt::Display for PlanAction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChangeOwner { path, owner, group } => {
                write!(f, "chown ")?;
                match owner {
                    Some(uid) => write!(f, "{uid} ")?,
                    None => write!(f, "- ")?,
                }
                match group {
                    Some(gid) => write!(f, "{gid} ")?,
                    None => write!(f, "- ")?,
                }
                write!(f, "{}", path.display())
            }
            Self::ChangeMode { path, mode } => write!(f, "chmod {mode} {}", path.display()),
        }
    }
}

/// The actions that apply `changes` to `targets`, in the order they are
/// performed.
///
/// `targets` is in discovery order and is walked in reverse, so children come
/// before the directories containing them. For each path the ownership change
/// (if any) comes before the mode change (if any).
pub fn actions<'a>(
    targets: &'a [PathBuf],
    changes: &ChangeSet,
) -> impl Iterator<Item = PlanAction<'a>> {
    let changes = *changes;
    let mode = changes.mode.mode();

    targets.iter().rev().flat_map(move |path| {
        let chown = changes
            .changes_ownership()
            .then_some(PlanAction::ChangeOwner {
                path: path.as_path(),
                owner: changes.owner,
                group: changes.group,
            });
        let chmod = mode.map(|mode| PlanAction::ChangeMode {
            path: path.as_path(),
            mode,
        });
        chown.into_iter().chain(chmod)
    })
}

/// Trait for the filesystem calls made by the applier.
///
/// Both calls follow symlinks, like `chown(2)` and `chmod(2)`.
pub trait FileOps {
    /// Change the owner and/or group of `path`; `None` leaves that id as is.
    ///
    /// # Errors
    ///
    /// Returns the system error if the call fails.
    fn change_owner(&self, path: &Path, owner: Option<Uid>, group: Option<Gid>) -> io::Result<()>;

    /// Set the permission bits of `path`.
    ///
    /// # Errors
    ///
    /// Returns the system error if the call fails.
    fn change_mode(&self, path: &Path, mode: Mode) -> io::Result<()>;
}

/// Production implementation making the real system calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFileOps;

impl FileOps for SystemFileOps {
    fn change_owner(&self, path: &Path, owner: Option<Uid>, group: Option<Gid>) -> io::Result<()> {
        nix::unistd::chown(path, owner, group).map_err(io::Error::from)
    }

    fn change_mode(&self, path: &Path, mode: Mode) -> io::Result<()> {
        fs::set_permissions(path, Permissions::from_mode(mode.bits()))
    }
}

/// A call recorded by [`MockFileOps`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    /// `change_owner` was called.
    Chown(PathBuf, Option<Uid>, Option<Gid>),
    /// `change_mode` was called.
    Chmod(PathBuf, Mode),
}

/// Mock implementation that records calls and fails on request.
///
/// # Examples
///
/// ```
/// use cogp::apply::{FileOps, MockFileOps, RecordedCall};
/// use cogp::Mode;
/// use nix::errno::Errno;
/// use std::path::{Path, PathBuf};
///
/// let ops = MockFileOps::new().fail_on("/locked", Errno::EPERM);
/// let mode = Mode::from_bits(0o644).unwrap();
///
/// assert!(ops.change_mode(Path::new("/open"), mode).is_ok());
/// assert!(ops.change_mode(Path::new("/locked"), mode).is_err());
/// assert_eq!(ops.calls()[0], RecordedCall::Chmod(PathBuf::from("/open"), mode));
/// ```
#[derive(Debug, Default)]
pub struct MockFileOps {
    calls: RefCell<Vec<RecordedCall>>,
    failing: HashMap<PathBuf, Errno>,
}

impl MockFileOps {
    /// Create a mock where every call succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call on `path` fail with `errno`.
    #[must_use]
    pub fn fail_on(mut self, path: impl Into<PathBuf>, errno: Errno) -> Self {
        self.failing.insert(path.into(), errno);
        self
    }

    /// Calls made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    fn outcome(&self, path: &Path) -> io::Result<()> {
        match self.failing.get(path) {
            Some(errno) => Err(io::Error::from(*errno)),
            None => Ok(()),
        }
    }
}

impl FileOps for MockFileOps {
    fn change_owner(&self, path: &Path, owner: Option<Uid>, group: Option<Gid>) -> io::Result<()> {
        self.calls
            .borrow_mut()
            .push(RecordedCall::Chown(path.to_path_buf(), owner, group));
        self.outcome(path)
    }

    fn change_mode(&self, path: &Path, mode: Mode) -> io::Result<()> {
        self.calls
            .borrow_mut()
            .push(RecordedCall::Chmod(path.to_path_buf(), mode));
        self.outcome(path)
    }
}

/// The result of one operation on one path.
#[derive(Debug)]
pub enum Outcome {
    /// The operation succeeded.
    Applied {
        /// The operation performed.
        operation: Operation,
        /// The path modified.
        path: PathBuf,
    },
    /// The operation failed; the run carried on.
    Failed(Failure),
}

impl Outcome {
    /// Returns `true` if the operation failed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Every outcome of an apply pass, in the order attempted.
#[derive(Debug, Default)]
pub struct ApplyReport {
    outcomes: Vec<Outcome>,
}

impl ApplyReport {
    /// All outcomes in the order they were attempted.
    #[must_use]
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// The failed operations, in the order attempted.
    pub fn failures(&self) -> impl Iterator<Item = &Failure> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            Outcome::Failed(failure) => Some(failure),
            Outcome::Applied { .. } => None,
        })
    }

    /// Consume the report, keeping only the failures.
    #[must_use]
    pub fn into_failures(self) -> Vec<Failure> {
        self.outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                Outcome::Failed(failure) => Some(failure),
                Outcome::Applied { .. } => None,
            })
            .collect()
    }

    /// Number of operations attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of operations that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    fn record(&mut self, operation: Operation, path: &Path, result: io::Result<()>) {
        let outcome = match result {
            Ok(()) => Outcome::Applied {
                operation,
                path: path.to_path_buf(),
            },
            Err(error) => {
                debug!("{:?} failed for {}: {error}", operation, path.display());
                Outcome::Failed(Failure::new(operation.into(), path, error))
            }
        };
        self.outcomes.push(outcome);
    }
}

/// Apply `changes` to every target.
///
/// The calls are made in the order given by [`actions`]: children before
/// their directories, ownership before mode. A failure never prevents any
/// other operation from being attempted.
///
/// # Examples
///
/// ```
/// use cogp::apply::{apply, MockFileOps, RecordedCall};
/// use cogp::{ChangeSet, Mode, ModeChange};
/// use std::path::PathBuf;
///
/// let mode = Mode::from_bits(0o700).unwrap();
/// let changes = ChangeSet::new(None, None, ModeChange::Set(mode));
/// let targets = vec![PathBuf::from("/d"), PathBuf::from("/d/f")];
///
/// let ops = MockFileOps::new();
/// let report = apply(&targets, &changes, &ops);
///
/// assert_eq!(report.failed(), 0);
/// assert_eq!(ops.calls(), vec![
///     RecordedCall::Chmod(PathBuf::from("/d/f"), mode),
///     RecordedCall::Chmod(PathBuf::from("/d"), mode),
/// ]);
/// ```
pub fn apply<F: FileOps + ?Sized>(targets: &[PathBuf], changes: &ChangeSet, ops: &F) -> ApplyReport {
    let mut report = ApplyReport::default();

    for action in actions(targets, changes) {
        let result = match action {
            PlanAction::ChangeOwner { path, owner, group } => ops.change_owner(path, owner, group),
            PlanAction::ChangeMode { path, mode } => ops.change_mode(path, mode),
        };
        report.record(action.operation(), action.path(), result);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::ModeChange;

    fn mode(bits: u32) -> Mode {
        Mode::from_bits(bits).unwrap()
    }

    fn targets(items: &[&str]) -> Vec<PathBuf> {
        items.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_reverse_order_and_owner_before_mode() {
        let changes = ChangeSet::new(
            Some(Uid::from_raw(1000)),
            Some(Gid::from_raw(100)),
            ModeChange::Set(mode(0o750)),
        );
        let ops = MockFileOps::new();
        let report = apply(&targets(&["/a", "/a/b"]), &changes, &ops);

        assert_eq!(report.attempted(), 4);
        assert_eq!(report.failed(), 0);
        assert_eq!(
            ops.calls(),
            vec![
                RecordedCall::Chown(
                    PathBuf::from("/a/b"),
                    Some(Uid::from_raw(1000)),
                    Some(Gid::from_raw(100))
                ),
                RecordedCall::Chmod(PathBuf::from("/a/b"), mode(0o750)),
                RecordedCall::Chown(
                    PathBuf::from("/a"),
                    Some(Uid::from_raw(1000)),
                    Some(Gid::from_raw(100))
                ),
                RecordedCall::Chmod(PathBuf::from("/a"), mode(0o750)),
            ]
        );
    }

    #[test]
    fn test_mode_only_skips_chown() {
        let changes = ChangeSet::new(None, None, ModeChange::Set(mode(0o644)));
        let ops = MockFileOps::new();
        apply(&targets(&["/x"]), &changes, &ops);
        assert_eq!(
            ops.calls(),
            vec![RecordedCall::Chmod(PathBuf::from("/x"), mode(0o644))]
        );
    }

    #[test]
    fn test_ownership_only_skips_chmod() {
        let changes = ChangeSet::new(None, Some(Gid::from_raw(5)), ModeChange::Unchanged);
        let ops = MockFileOps::new();
        apply(&targets(&["/x"]), &changes, &ops);
        assert_eq!(
            ops.calls(),
            vec![RecordedCall::Chown(
                PathBuf::from("/x"),
                None,
                Some(Gid::from_raw(5))
            )]
        );
    }

    #[test]
    fn test_nothing_requested_is_empty() {
        let changes = ChangeSet::new(None, None, ModeChange::Unchanged);
        let ops = MockFileOps::new();
        let report = apply(&targets(&["/x", "/y"]), &changes, &ops);
        assert_eq!(report.attempted(), 0);
        assert!(ops.calls().is_empty());
    }

    #[test]
    fn test_one_bad_path_in_five() {
        let changes = ChangeSet::new(
            Some(Uid::from_raw(0)),
            None,
            ModeChange::Set(mode(0o600)),
        );
        let ops = MockFileOps::new().fail_on("/3", Errno::ENOENT);
        let report = apply(&targets(&["/1", "/2", "/3", "/4", "/5"]), &changes, &ops);

        // both operations are still attempted on every path
        assert_eq!(ops.calls().len(), 10);
        assert_eq!(report.attempted(), 10);

        let failures: Vec<&Failure> = report.failures().collect();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].operation, FailedOperation::ChangeOwner);
        assert_eq!(failures[1].operation, FailedOperation::ChangeMode);
        assert!(failures.iter().all(|f| f.path == Path::new("/3")));
    }

    #[test]
    fn test_mode_only_failure_gives_one_record() {
        let changes = ChangeSet::new(None, None, ModeChange::Set(mode(0o600)));
        let ops = MockFileOps::new().fail_on("/missing", Errno::ENOENT);
        let report = apply(
            &targets(&["/a", "/b", "/missing", "/c", "/d"]),
            &changes,
            &ops,
        );
        assert_eq!(report.attempted(), 5);
        let failures = report.into_failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].error_text(), "No such file or directory");
    }

    fn describe(call: &RecordedCall) -> String {
        match call {
            RecordedCall::Chown(path, owner, group) => PlanAction::ChangeOwner {
                path: path.as_path(),
                owner: *owner,
                group: *group,
            }
            .description(),
            RecordedCall::Chmod(path, mode) => PlanAction::ChangeMode {
                path: path.as_path(),
                mode: *mode,
            }
            .description(),
        }
    }

    #[test]
    fn test_calls_match_described_actions() {
        let changes = ChangeSet::new(
            Some(Uid::from_raw(42)),
            None,
            ModeChange::Set(mode(0o2750)),
        );
        let paths = targets(&["/t", "/t/a", "/t/a/b", "/t/c", "/t/a"]);

        let described: Vec<String> = actions(&paths, &changes)
            .map(|action| action.description())
            .collect();

        let ops = MockFileOps::new();
        apply(&paths, &changes, &ops);
        let performed: Vec<String> = ops.calls().iter().map(describe).collect();

        assert_eq!(performed, described);
        assert_eq!(described.first().map(String::as_str), Some("chown 42 - /t/a"));
        assert_eq!(described.last().map(String::as_str), Some("chmod 2750 /t"));
    }

    #[test]
    fn test_action_accessors() {
        let path = PathBuf::from("/x");
        let action = PlanAction::ChangeMode {
            path: &path,
            mode: mode(0o600),
        };
        assert_eq!(action.operation(), Operation::ChangeMode);
        assert_eq!(action.path(), Path::new("/x"));
    }

    #[test]
    fn test_system_ops_change_mode() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("f");
        fs::write(&file, b"x").unwrap();

        SystemFileOps.change_mode(&file, mode(0o640)).unwrap();
        let bits = fs::metadata(&file).unwrap().permissions().mode() & 0o7777;
        assert_eq!(bits, 0o640);
    }

    #[test]
    fn test_system_ops_chown_to_self() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("f");
        fs::write(&file, b"x").unwrap();

        // giving a file to its current owner is always permitted
        SystemFileOps
            .change_owner(&file, Some(nix::unistd::geteuid()), None)
            .unwrap();
    }

    #[test]
    fn test_system_ops_missing_path() {
        let temp = tempfile::tempdir().unwrap();
        let err = SystemFileOps
            .change_mode(&temp.path().join("absent"), mode(0o600))
            .unwrap_err();
        assert_eq!(err.raw_os_error(), Some(Errno::ENOENT as i32));
    }
}
