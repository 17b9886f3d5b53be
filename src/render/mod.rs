//! Report rendering
//!
//! Every renderer is a pure function of a [`TestReport`] and produces the same
//! bytes for the same report. [`write_reports`] writes the file-based formats,
//! attempting each target independently and collecting failures instead of
//! stopping at the first one.

pub mod console;
pub mod html;
pub mod json;
pub mod markdown;


use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

use crate::config::ReportConfig;
use crate::report::TestReport;

pub use console::render_console;
pub use html::render_html;
pub use json::{load_report, parse_json, render_json};
pub use markdown::{render_ci_stats, render_ci_summary, CiStats};

/// A report could not be produced or written
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The file-based report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Json,
    Html,
    CiSummary,
    CiStats,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Json => write!(f, "JSON report"),
            ReportKind::Html => write!(f, "HTML report"),
            ReportKind::CiSummary => write!(f, "CI summary"),
            ReportKind::CiStats => write!(f, "CI stats"),
        }
    }
}

/// What [`write_reports`] managed to write
#[derive(Debug, Default)]
pub struct RenderSummary {
    pub written: Vec<(ReportKind, PathBuf)>,
    pub failures: Vec<(ReportKind, RenderError)>,
}

impl RenderSummary {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

type Renderer = fn(&TestReport) -> Result<String, RenderError>;

impl ReportKind {
    fn renderer(self) -> Renderer {
        match self {
            ReportKind::Json => render_json,
            ReportKind::Html => |r| Ok(render_html(r)),
            ReportKind::CiSummary => |r| Ok(render_ci_summary(r)),
            ReportKind::CiStats => render_ci_stats,
        }
    }
}

/// Write the JSON, HTML, CI summary and CI stats documents
pub fn write_reports(report: &TestReport, config: &ReportConfig) -> RenderSummary {
    write_targets(
        report,
        &[
            (ReportKind::Json, config.report_file.as_path()),
            (ReportKind::Html, config.html_file.as_path()),
            (ReportKind::CiSummary, config.summary_file.as_path()),
            (ReportKind::CiStats, config.stats_file.as_path()),
        ],
    )
}

/// Render and write each target in order. A failed target is logged and
/// collected; the remaining targets are still attempted.
pub fn write_targets(report: &TestReport, targets: &[(ReportKind, &Path)]) -> RenderSummary {
    let mut summary = RenderSummary::default();
    for &(kind, path) in targets {
        let render = kind.renderer();
        match render(report).and_then(|content| write_file(path, &content)) {
            Ok(()) => {
                info!(kind = %kind, path = %path.display(), "report written");
                summary.written.push((kind, path.to_path_buf()));
            }
            Err(e) => {
                error!(kind = %kind, path = %path.display(), "{e}");
                summary.failures.push((kind, e));
            }
        }
    }
    summary
}

/// Write `contents` to `path`; the parent directory must already exist
pub fn write_file(path: &Path, contents: &str) -> Result<(), RenderError> {
    fs::write(path, contents).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
