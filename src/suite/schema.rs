//! Check battery definition loaded from YAML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::plan::{validate_checks, PlanCheck};

/// A named battery of plan checks and shell commands
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteDefinition {
    #[serde(default)]
    pub name: Option<String>,
    /// Plan document, relative to the suite file
    #[serde(default)]
    pub plan: Option<PathBuf>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub parallel: Option<bool>,
    #[serde(default)]
    pub plan_checks: Vec<PlanCheck>,
    #[serde(default)]
    pub commands: Vec<CommandCheck>,
}

/// A shell command whose exit status decides the outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandCheck {
    pub name: String,
    pub run: String,
    /// Relative to the suite file
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
    /// Overrides the suite timeout for this command
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub skip: bool,
}

impl SuiteDefinition {
    pub fn check_count(&self) -> usize {
        self.plan_checks.len() + self.commands.len()
    }
}

/// A problem in a suite file
#[derive(Debug)]
pub struct SuiteError {
    pub message: String,
    pub check: Option<String>,
}

impl fmt::Display for SuiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.check {
            write!(f, "Check '{}': {}", name, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for SuiteError {}

/// Read, parse and validate a suite file
pub fn load_suite(path: &Path) -> Result<SuiteDefinition> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read suite: {}", path.display()))?;
    parse_suite(&content).with_context(|| format!("Invalid suite: {}", path.display()))
}

pub fn parse_suite(content: &str) -> Result<SuiteDefinition> {
    let suite: SuiteDefinition =
        serde_yaml::from_str(content).context("Failed to parse suite YAML")?;

    if let Err(errors) = validate_suite(&suite) {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n  - ");
        anyhow::bail!("Suite validation failed:\n  - {joined}");
    }
    Ok(suite)
}

/// Validate a suite, collecting every problem
pub fn validate_suite(suite: &SuiteDefinition) -> Result<(), Vec<SuiteError>> {
    let mut errors = Vec::new();

    if suite.timeout_secs == Some(0) {
        errors.push(SuiteError {
            message: "timeout_secs must be greater than zero".to_string(),
            check: None,
        });
    }

    if !suite.plan_checks.is_empty() && suite.plan.is_none() {
        errors.push(SuiteError {
            message: "plan_checks require a plan file".to_string(),
            check: None,
        });
    }

    if let Err(rule_errors) = validate_checks(&suite.plan_checks) {
        errors.extend(rule_errors.into_iter().map(|e| SuiteError {
            message: e.message,
            check: e.check,
        }));
    }

    for command in &suite.commands {
        if command.name.trim().is_empty() {
            errors.push(SuiteError {
                message: "Command name cannot be empty".to_string(),
                check: None,
            });
            continue;
        }
        if command.run.trim().is_empty() {
            errors.push(SuiteError {
                message: "run cannot be empty".to_string(),
                check: Some(command.name.clone()),
            });
        }
        if command.timeout_secs == Some(0) {
            errors.push(SuiteError {
                message: "timeout_secs must be greater than zero".to_string(),
                check: Some(command.name.clone()),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
