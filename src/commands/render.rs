//! `plancheck render <REPORT>`: re-render a saved structured report

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::run::print_render_summary;
use crate::render::{load_report, render_console, write_targets, ReportKind, RenderSummary};

/// Print a saved report and write whichever of its HTML and Markdown forms
/// were requested. Every requested file is attempted.
pub fn execute(
    report_path: &Path,
    html_file: Option<PathBuf>,
    summary_file: Option<PathBuf>,
) -> Result<bool> {
    let (passed, summary) = rerender(report_path, html_file, summary_file)?;
    print_render_summary(&summary);
    Ok(passed)
}

fn rerender(
    report_path: &Path,
    html_file: Option<PathBuf>,
    summary_file: Option<PathBuf>,
) -> Result<(bool, RenderSummary)> {
    let report = load_report(report_path)?;
    if let Err(e) = report.check_consistency() {
        warn!(path = %report_path.display(), "{e}");
    }
    print!("{}", render_console(&report));

    let targets: Vec<(ReportKind, &Path)> = [
        (ReportKind::Html, html_file.as_deref()),
        (ReportKind::CiSummary, summary_file.as_deref()),
    ]
    .into_iter()
    .filter_map(|(kind, path)| path.map(|p| (kind, p)))
    .collect();

    Ok((report.all_passed(), write_targets(&report, &targets)))
}
