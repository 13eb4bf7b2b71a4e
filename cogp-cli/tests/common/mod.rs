//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with a temporary directory tree
//! - Command builder helpers
//! - Mode and record inspection helpers

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// ASCII record separator terminating every diagnostic record.
#[allow(dead_code)]
pub const RS: u8 = 0x1E;

/// Test environment rooted in a temporary directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new, empty test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a command builder for the cogp binary.
    ///
    /// `COGP_LOG_MODE` is cleared so the caller's environment cannot change
    /// what ends up on stderr.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("cogp").expect("Failed to find cogp binary");
        cmd.env_remove("COGP_LOG_MODE");
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Create a subdirectory (and its parents) in the test environment.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Create a file with some content in the test environment.
    pub fn create_file(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        fs::write(&path, b"content").expect("Failed to create test file");
        path
    }

    /// Build `tree/{f1, sub/{f2, f3}}` and return the paths, root first.
    pub fn create_tree(&self) -> Vec<PathBuf> {
        let root = self.create_dir("tree");
        let sub = self.create_dir("tree/sub");
        vec![
            root,
            self.create_file("tree/f1"),
            sub,
            self.create_file("tree/sub/f2"),
            self.create_file("tree/sub/f3"),
        ]
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// The permission and special bits of `path` (not following symlinks).
#[allow(dead_code)]
pub fn mode_of(path: &Path) -> u32 {
    fs::symlink_metadata(path)
        .expect("Failed to stat path")
        .permissions()
        .mode()
        & 0o7777
}

/// Set permission bits directly, bypassing cogp.
#[allow(dead_code)]
pub fn set_mode(path: &Path, mode: u32) {
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).expect("Failed to chmod");
}

/// Number of RS-terminated records in a stderr capture.
#[allow(dead_code)]
pub fn record_count(stderr: &[u8]) -> usize {
    stderr.iter().filter(|b| **b == RS).count()
}

/// Join paths into a NUL-terminated list.
#[allow(dead_code)]
pub fn nul_list(paths: &[&Path]) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;

    let mut list = Vec::new();
    for path in paths {
        list.extend_from_slice(path.as_os_str().as_bytes());
        list.push(0);
    }
    list
}

/// Whether the tests run with root privileges (which bypass permission
/// checks).
#[allow(dead_code)]
pub fn running_as_root() -> bool {
    nix::unistd::geteuid().is_root()
}
