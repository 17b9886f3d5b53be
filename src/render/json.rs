//! Structured JSON report, field-for-field with [`TestReport`]

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::RenderError;
use crate::report::TestReport;

pub fn render_json(report: &TestReport) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn parse_json(content: &str) -> Result<TestReport, RenderError> {
    Ok(serde_json::from_str(content)?)
}

/// Load a previously written structured report
pub fn load_report(path: &Path) -> Result<TestReport> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read report: {}", path.display()))?;
    parse_json(&content).with_context(|| format!("Failed to parse report: {}", path.display()))
}
