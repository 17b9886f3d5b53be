//! `plancheck run <SUITE>`

use anyhow::{Context, Result};
use colored::Colorize;
use std::env;
use std::path::{Path, PathBuf};

use crate::config::{FileConfig, ReportConfig, ReportOverrides, RunConfig};
use crate::render::{render_console, write_reports, RenderSummary};
use crate::suite::run_suite_file;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub report: bool,
    pub report_file: Option<PathBuf>,
    pub html_file: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub sequential: bool,
}

/// Run a suite, print the console report and write report files when enabled.
/// Returns whether every check passed.
pub fn execute(suite_path: &Path, options: RunOptions) -> Result<bool> {
    let file_config = match &options.config {
        Some(path) => FileConfig::load(path)?,
        None => {
            let cwd = env::current_dir().context("Failed to get current directory")?;
            FileConfig::discover(&cwd)?
        }
    };
    let run_config = RunConfig::resolve(&file_config, options.sequential);

    let report = run_suite_file(suite_path, &run_config)?;
    print!("{}", render_console(&report));

    let overrides = ReportOverrides {
        enabled: options.report,
        report_file: options.report_file,
        html_file: options.html_file,
        summary_file: None,
    };
    let report_config = ReportConfig::from_process_env(&overrides, &file_config);
    if report_config.enabled {
        print_render_summary(&write_reports(&report, &report_config));
    }

    Ok(report.all_passed())
}

pub(crate) fn print_render_summary(summary: &RenderSummary) {
    for (kind, path) in &summary.written {
        println!("{} {kind} saved to {}", "✓".green().bold(), path.display());
    }
    for (kind, error) in &summary.failures {
        eprintln!("{} {kind} not written: {error}", "✗".red().bold());
    }
}
