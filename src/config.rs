//! Output locations and run settings
//!
//! Values resolve with precedence: command-line flag, then environment, then
//! `plancheck.toml`, then built-in defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_REPORT_FILE: &str = "test-report.json";
pub const DEFAULT_HTML_FILE: &str = "test-report.html";
pub const DEFAULT_SUMMARY_FILE: &str = "test-summary.md";
pub const DEFAULT_STATS_FILE: &str = "test-results.json";

/// CI-provided location for the Markdown summary
pub const SUMMARY_PATH_ENV: &str = "GITHUB_STEP_SUMMARY";

pub const CONFIG_FILE_NAME: &str = "plancheck.toml";

/// Default per-check timeout (5 minutes)
pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(300);

pub const DEFAULT_SUITE_NAME: &str = "Deployment Checks";

/// Contents of `plancheck.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub report: ReportSection,
    #[serde(default)]
    pub run: RunSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportSection {
    pub enabled: Option<bool>,
    pub report_file: Option<PathBuf>,
    pub html_file: Option<PathBuf>,
    pub summary_file: Option<PathBuf>,
    pub stats_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    pub timeout_secs: Option<u64>,
    pub parallel: Option<bool>,
    pub suite_name: Option<String>,
}

impl FileConfig {
    /// Load an explicit config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Load `plancheck.toml` from `dir` if present, else defaults
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ReportOverrides {
    pub enabled: bool,
    pub report_file: Option<PathBuf>,
    pub html_file: Option<PathBuf>,
    pub summary_file: Option<PathBuf>,
}

/// Resolved report output settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Whether file-based reports are written at all
    pub enabled: bool,
    pub report_file: PathBuf,
    pub html_file: PathBuf,
    pub summary_file: PathBuf,
    pub stats_file: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            report_file: PathBuf::from(DEFAULT_REPORT_FILE),
            html_file: PathBuf::from(DEFAULT_HTML_FILE),
            summary_file: PathBuf::from(DEFAULT_SUMMARY_FILE),
            stats_file: PathBuf::from(DEFAULT_STATS_FILE),
        }
    }
}

impl ReportConfig {
    /// Resolve using `env` for environment lookups
    pub fn resolve<E>(overrides: &ReportOverrides, file: &FileConfig, env: E) -> Self
    where
        E: Fn(&str) -> Option<String>,
    {
        let section = &file.report;
        let defaults = Self::default();

        let summary_from_env = env(SUMMARY_PATH_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Self {
            enabled: overrides.enabled || section.enabled.unwrap_or(false),
            report_file: overrides
                .report_file
                .clone()
                .or_else(|| section.report_file.clone())
                .unwrap_or(defaults.report_file),
            html_file: overrides
                .html_file
                .clone()
                .or_else(|| section.html_file.clone())
                .unwrap_or(defaults.html_file),
            summary_file: overrides
                .summary_file
                .clone()
                .or(summary_from_env)
                .or_else(|| section.summary_file.clone())
                .unwrap_or(defaults.summary_file),
            stats_file: section.stats_file.clone().unwrap_or(defaults.stats_file),
        }
    }

    /// Resolve against the process environment
    pub fn from_process_env(overrides: &ReportOverrides, file: &FileConfig) -> Self {
        Self::resolve(overrides, file, |key| std::env::var(key).ok())
    }
}

/// Resolved battery execution settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub timeout: Duration,
    pub parallel: bool,
    pub suite_name: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_CHECK_TIMEOUT,
            parallel: true,
            suite_name: None,
        }
    }
}

impl RunConfig {
    /// `sequential` forces serial execution regardless of the file
    pub fn resolve(file: &FileConfig, sequential: bool) -> Self {
        let defaults = Self::default();
        Self {
            timeout: file
                .run
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            parallel: !sequential && file.run.parallel.unwrap_or(defaults.parallel),
            suite_name: file.run.suite_name.clone(),
        }
    }
}
