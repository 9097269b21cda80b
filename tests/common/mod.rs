//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which owns a temporary directory holding a fresh
//! database file plus the repositories built on top of it.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use gallery::accounts::AccountRepository;
use gallery::images::ImageRepository;
use gallery_db::gateway::Gateway;
use tempfile::TempDir;

/// Repositories over a throwaway database.
pub struct TestHarness {
    pub dir: TempDir,
    pub gateway: Gateway,
    pub accounts: AccountRepository,
    pub images: ImageRepository,
}

impl TestHarness {
    /// Create a harness using a connection per call.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let gateway =
            Gateway::direct(dir.path().join("gallery.db")).expect("failed to open database");
        Self::from_parts(dir, gateway)
    }

    /// Create a harness whose gateway uses a pool of `size` connections.
    pub fn pooled(size: u32) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let gateway = Gateway::pooled(dir.path().join("gallery.db"), size)
            .expect("failed to open pooled database");
        Self::from_parts(dir, gateway)
    }

    fn from_parts(dir: TempDir, gateway: Gateway) -> Self {
        Self {
            accounts: AccountRepository::new(gateway.clone()),
            images: ImageRepository::new(gateway.clone()),
            gateway,
            dir,
        }
    }

    /// Path of the database file.
    pub fn db_path(&self) -> &Path {
        self.gateway.path()
    }

    /// Write `bytes` to a file named `name` inside the harness directory.
    pub fn write_file(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, bytes).expect("failed to write fixture");
        path
    }

    /// Path inside the harness directory that does not exist yet.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
