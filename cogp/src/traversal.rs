//! Recursive expansion of top-level paths into the full target list.
//!
//! # Ordering
//!
//! Expansion appends every directory before any of its children are
//! discovered, so the target list is in parent-before-child *discovery*
//! order. Changes are applied by walking the list in reverse, which yields
//! child-before-parent *application* order: a directory is only restricted
//! after everything below it has been handled.
//!
//! # Symlinks
//!
//! Top-level paths are tested with a link-following stat, so a top-level
//! symlink to a directory is expanded. Entries discovered below it are
//! classified without following links and symlinks among them are skipped
//! entirely: they are neither modified nor descended into. Because no link
//! is ever followed during the walk, cycles cannot occur.

use std::fs::{self, FileType};
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::report::{FailedOperation, Failure};

/// What kind of filesystem entry a path names, without following links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory: descended into and modified.
    Directory,
    /// A symbolic link: skipped.
    Symlink,
    /// A regular file, device, fifo or socket: modified.
    RegularOrOther,
}

impl From<FileType> for EntryKind {
    fn from(file_type: FileType) -> Self {
        if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_dir() {
            Self::Directory
        } else {
            Self::RegularOrOther
        }
    }
}

/// Classify a path with a non-link-following stat.
///
/// # Errors
///
/// Returns the stat error if the path cannot be accessed.
pub fn classify(path: &Path) -> io::Result<EntryKind> {
    fs::symlink_metadata(path).map(|metadata| EntryKind::from(metadata.file_type()))
}

/// The result of expanding a set of paths.
#[derive(Debug, Default)]
pub struct Expansion {
    /// Targets in discovery order (parents before their children).
    pub targets: Vec<PathBuf>,
    /// Directories that could not be listed and entries that could not be
    /// stat'ed.
    pub failures: Vec<Failure>,
}

impl Expansion {
    /// Iterate the targets in application order (children before parents).
    pub fn application_order(&self) -> impl Iterator<Item = &Path> {
        self.targets.iter().rev().map(PathBuf::as_path)
    }
}

/// Expand `initial` into the full target list.
///
/// Without `recursive` the input is returned unchanged. With it, every
/// top-level path that is a directory is walked depth-first and all
/// non-symlink descendants are appended after the initial paths. If none of
/// the initial paths is a directory, recursion has no effect.
///
/// Failures to list a directory or stat an entry are collected and the walk
/// carries on with the remaining directories.
///
/// # Examples
///
/// ```no_run
/// use cogp::traversal::expand;
/// use std::path::PathBuf;
///
/// let expansion = expand(vec![PathBuf::from("/srv/www")], true);
/// for path in expansion.application_order() {
///     println!("{}", path.display());
/// }
/// ```
#[must_use]
pub fn expand(initial: Vec<PathBuf>, recursive: bool) -> Expansion {
    if !recursive {
        return Expansion {
            targets: initial,
            failures: Vec::new(),
        };
    }

    let mut stack: Vec<PathBuf> = initial
        .iter()
        .filter(|path| is_directory(path))
        .cloned()
        .collect();
    let mut expansion = Expansion {
        targets: initial,
        failures: Vec::new(),
    };

    while let Some(dir) = stack.pop() {
        expand_directory(dir, &mut stack, &mut expansion);
    }

    debug!(
        "expanded to {} target(s) with {} failure(s)",
        expansion.targets.len(),
        expansion.failures.len()
    );
    expansion
}

/// List one directory, pushing subdirectories onto `stack`.
///
/// The directory handle lives only for the duration of this call.
fn expand_directory(dir: PathBuf, stack: &mut Vec<PathBuf>, expansion: &mut Expansion) {
    debug!("listing {}", dir.display());

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(error) => {
            expansion
                .failures
                .push(Failure::new(FailedOperation::OpenDirectory, dir, error));
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                expansion
                    .failures
                    .push(Failure::new(FailedOperation::OpenDirectory, dir, error));
                return;
            }
        };

        let path = dir.join(entry.file_name());
        match classify(&path) {
            Ok(EntryKind::Symlink) => debug!("skipping symlink {}", path.display()),
            Ok(EntryKind::Directory) => {
                stack.push(path.clone());
                expansion.targets.push(path);
            }
            Ok(EntryKind::RegularOrOther) => expansion.targets.push(path),
            Err(error) => expansion
                .failures
                .push(Failure::new(FailedOperation::Access, path, error)),
        }
    }
}

/// Link-following directory test for top-level paths.
///
/// A path that cannot be stat'ed is simply not expanded; it will fail on its
/// own when the changes are applied.
fn is_directory(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(metadata) => metadata.is_dir(),
        Err(error) => {
            debug!("not expanding {}: {error}", path.display());
            false
        }
    }
}
