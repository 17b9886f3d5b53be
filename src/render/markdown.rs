//! Condensed CI summary (Markdown) and its machine-readable stats sibling

use serde::{Deserialize, Serialize};

use super::RenderError;
use crate::report::{format_duration, TestReport, TestStatus};

/// Aggregate counts for downstream automation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CiStats {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    #[serde(rename = "passRate")]
    pub pass_rate: f64,
    pub summary: String,
}

impl CiStats {
    pub fn from_report(report: &TestReport) -> Self {
        Self {
            total: report.total_tests,
            passed: report.passed_tests,
            failed: report.failed_tests,
            skipped: report.skipped_tests,
            pass_rate: report.pass_rate().unwrap_or(0.0),
            summary: report.summary.clone(),
        }
    }
}

/// Render the stats document as compact JSON
pub fn render_ci_stats(report: &TestReport) -> Result<String, RenderError> {
    Ok(serde_json::to_string(&CiStats::from_report(report))?)
}

/// Render the Markdown summary: badge, counts table, one row per outcome,
/// then error details for failed outcomes.
pub fn render_ci_summary(report: &TestReport) -> String {
    let rate = report.pass_rate().unwrap_or(0.0);
    let mut out = String::new();

    out.push_str(&format!(
        "## 🧪 {} Results\n\n",
        escape_cell(&report.test_suite)
    ));

    if report.all_passed() {
        out.push_str("![Tests Passed](https://img.shields.io/badge/tests-passed-success)\n\n");
    } else {
        out.push_str("![Tests Failed](https://img.shields.io/badge/tests-failed-critical)\n\n");
    }

    out.push_str("### 📊 Summary\n\n");
    out.push_str("| Metric | Value |\n");
    out.push_str("|--------|-------|\n");
    out.push_str(&format!("| Total Tests | {} |\n", report.total_tests));
    out.push_str(&format!("| ✅ Passed | {} |\n", report.passed_tests));
    out.push_str(&format!("| ❌ Failed | {} |\n", report.failed_tests));
    out.push_str(&format!("| ⏭️ Skipped | {} |\n", report.skipped_tests));
    out.push_str(&format!("| 📊 Pass Rate | {rate:.1}% |\n"));
    out.push_str(&format!(
        "| ⏱️ Duration | {} |\n\n",
        format_duration(report.duration)
    ));

    out.push_str("### 📋 Test Details\n\n");
    out.push_str("| Test Name | Status | Duration |\n");
    out.push_str("|-----------|--------|----------|\n");
    for outcome in &report.results {
        let status = match outcome.status {
            TestStatus::Pass => "✅ Pass",
            TestStatus::Fail => "❌ Fail",
            TestStatus::Skip => "⏭️ Skip",
        };
        out.push_str(&format!(
            "| {} | {status} | {} |\n",
            escape_cell(&outcome.name),
            format_duration(outcome.duration)
        ));
    }

    let failures: Vec<_> = report
        .failures()
        .filter_map(|o| o.error.as_ref().map(|e| (o, e)))
        .collect();
    if !failures.is_empty() {
        out.push_str("\n### ❌ Failed Tests\n\n");
        for (outcome, error) in failures {
            let fence = code_fence(error);
            out.push_str(&format!("**{}**\n", escape_inline(&outcome.name)));
            out.push_str(&format!("{fence}\n{error}\n{fence}\n\n"));
        }
    }

    out.push_str("\n### 📝 Summary\n\n");
    out.push_str(&report.summary);
    out.push('\n');
    out
}

/// Escape emphasis and code markers in inline text
fn escape_inline(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '*' | '_' | '`') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// A backtick fence longer than any backtick run inside `content`
fn code_fence(content: &str) -> String {
    let longest = content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

/// Keep a value inside a single table cell
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}
