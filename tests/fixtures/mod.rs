//! Shared test fixtures for workspace and CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use mailforge::services::{FileBlobStore, MemoryBlobStore, SeedModule, Workspace};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Hero module markup used across tests.
pub const HERO_CODE: &str = "<img src='{{url}}'>";

/// CTA module markup with a color placeholder.
pub const CTA_CODE: &str =
    "<a href=\"{{ctaURL}}\" style=\"background:{{ctaColor}}\">{{ctaText}}</a>";

/// Opens an empty in-memory workspace (empty seed).
pub fn memory_workspace() -> Workspace<MemoryBlobStore> {
    let (workspace, _) =
        Workspace::open(MemoryBlobStore::new(), Vec::new).expect("open in-memory workspace");
    workspace
}

/// Opens (or reopens) a file-backed workspace in `dir` with an empty seed.
pub fn file_workspace(dir: &Path) -> Workspace<FileBlobStore> {
    let (workspace, _) =
        Workspace::open(FileBlobStore::new(dir), Vec::new).expect("open file workspace");
    workspace
}

/// Seed list with a hero and a CTA module.
pub fn sample_seed() -> Vec<SeedModule> {
    vec![
        SeedModule::new("Hero", HERO_CODE),
        SeedModule::new("CTA", CTA_CODE),
    ]
}

/// Path to the mailforge binary
pub fn mailforge_bin() -> &'static str {
    env!("CARGO_BIN_EXE_mailforge")
}

/// Isolated CLI environment: its own config dir and data dir.
pub struct CliEnv {
    /// Keeps the temp directory alive
    pub temp: TempDir,
}

impl CliEnv {
    /// Creates a fresh isolated environment.
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("create temp dir"),
        }
    }

    /// Config directory passed through `MAILFORGE_CONFIG_DIR`.
    pub fn config_dir(&self) -> PathBuf {
        self.temp.path().join("config")
    }

    /// Data directory passed through `--data-dir`.
    pub fn data_dir(&self) -> PathBuf {
        self.temp.path().join("data")
    }

    /// Runs the binary with the given arguments.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(mailforge_bin())
            .env("MAILFORGE_CONFIG_DIR", self.config_dir())
            .env_remove("RUST_LOG")
            .arg("--data-dir")
            .arg(self.data_dir())
            .args(args)
            .output()
            .expect("Failed to execute command")
    }

    /// Runs the binary and returns trimmed stdout, asserting success.
    pub fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert_eq!(
            output.status.code(),
            Some(0),
            "{:?} should succeed. stderr: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Runs the binary and parses stdout as JSON.
    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let stdout = self.run_ok(args);
        serde_json::from_str(&stdout).expect("Should parse JSON output")
    }
}
