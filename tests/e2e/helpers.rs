//! Test helper functions for E2E tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Temp directory holding `files`, each written relative to its root
pub fn workspace(files: &[(&str, &str)]) -> Result<TempDir> {
    let temp = TempDir::new().context("Failed to create temp directory")?;
    for (name, content) in files {
        write(temp.path(), name, content)?;
    }
    Ok(temp)
}

pub fn write(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Run the plancheck binary in `dir` with a clean CI environment
pub fn plancheck(dir: &Path, args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_plancheck"))
        .args(args)
        .current_dir(dir)
        .env_remove("GITHUB_STEP_SUMMARY")
        .env_remove("PLANCHECK_LOG")
        .output()
        .context("Failed to run plancheck")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
