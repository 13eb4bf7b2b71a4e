//! Common test utilities for integration tests.
//!
//! This module provides fixture builders for directory trees used by the
//! pipeline tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory tree with named entries.
pub struct TreeFixture {
    temp_dir: TempDir,
}

#[allow(dead_code)]
impl TreeFixture {
    /// Creates an empty fixture.
    pub fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    /// Creates the standard fixture `root/{f1, B/{f2, f3}}`.
    pub fn standard() -> Self {
        let fixture = Self::new();
        fixture.dir("root/B");
        fixture.file("root/f1");
        fixture.file("root/B/f2");
        fixture.file("root/B/f3");
        fixture
    }

    /// Absolute path of a fixture entry.
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Creates a directory (and its parents).
    pub fn dir(&self, name: &str) -> PathBuf {
        let path = self.path(name);
        fs::create_dir_all(&path).expect("failed to create directory");
        path
    }

    /// Creates a regular file with mode 0644.
    pub fn file(&self, name: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, b"data").expect("failed to create file");
        set_mode(&path, 0o644);
        path
    }
}

/// Permission and special bits of `path`, without following symlinks.
#[allow(dead_code)]
pub fn mode_of(path: &Path) -> u32 {
    fs::symlink_metadata(path)
        .expect("failed to stat")
        .permissions()
        .mode()
        & 0o7777
}

/// Sets permission bits directly.
#[allow(dead_code)]
pub fn set_mode(path: &Path, mode: u32) {
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).expect("failed to chmod");
}
