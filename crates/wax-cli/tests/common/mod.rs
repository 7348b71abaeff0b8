//! Common test utilities for CLI testing.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::{tempdir, TempDir};

/// Test context with temporary directory
pub struct TestContext {
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Get path to temp directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of a project created under the temp directory
    pub fn project(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    /// `wax` running in the temp directory with a clean environment
    pub fn command(&self) -> Command {
        self.command_in(self.path())
    }

    /// `wax` running in `dir`
    pub fn command_in(&self, dir: &Path) -> Command {
        let mut cmd = Command::cargo_bin("wax").expect("Binary not found");
        cmd.current_dir(dir)
            .env("NO_COLOR", "1")
            .env("USER", "tester")
            .env_remove("USERNAME")
            .env_remove("WAX_CONFIG")
            .env_remove("WAX_REGISTRY_TOKEN")
            .env_remove("WAX_LOG_LEVEL")
            .env_remove("WAX_LOG_FILE")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run `wax new <name> [args...]` and return the project root
    pub fn new_project(&self, name: &str, args: &[&str]) -> PathBuf {
        self.command()
            .arg("new")
            .arg(name)
            .args(args)
            .assert()
            .success();
        self.project(name)
    }

    /// Write `<dir>/.wax/config.yaml`
    pub fn write_config(&self, dir: &Path, yaml: &str) {
        let config_dir = dir.join(".wax");
        fs::create_dir_all(&config_dir).expect("Failed to create .wax");
        fs::write(config_dir.join("config.yaml"), yaml).expect("Failed to write config");
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Flip the ignore flag of the anchor in `root` to false
pub fn activate(root: &Path) {
    let anchor = root.join("anchor.yml");
    let text = fs::read_to_string(&anchor).expect("Failed to read anchor");
    assert!(text.contains("ignore: true"), "unexpected anchor:\n{text}");
    fs::write(&anchor, text.replace("ignore: true", "ignore: false")).expect("Failed to write anchor");
}
