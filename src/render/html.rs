//! Self-contained HTML report

use super::console::TIMESTAMP_FORMAT;
use crate::report::{format_duration, TestOutcome, TestReport, TestStatus};

const STYLE: &str = r#"        body { font-family: Arial, sans-serif; margin: 20px; background-color: #f5f5f5; }
        .container { max-width: 1200px; margin: 0 auto; background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; border-bottom: 2px solid #007bff; padding-bottom: 20px; margin-bottom: 30px; }
        .stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin-bottom: 30px; }
        .stat-card { background: #f8f9fa; padding: 20px; border-radius: 8px; text-align: center; border-left: 4px solid #007bff; }
        .stat-number { font-size: 2em; font-weight: bold; color: #007bff; }
        .stat-label { color: #6c757d; margin-top: 5px; }
        .test-results { margin-top: 30px; }
        .test-item { display: flex; justify-content: space-between; align-items: center; padding: 15px; margin: 10px 0; border-radius: 5px; }
        .test-pass { background-color: #d4edda; border-left: 4px solid #28a745; }
        .test-fail { background-color: #f8d7da; border-left: 4px solid #dc3545; }
        .test-skip { background-color: #fff3cd; border-left: 4px solid #ffc107; }
        .status { font-weight: bold; padding: 5px 10px; border-radius: 3px; color: white; }
        .status-pass { background-color: #28a745; }
        .status-fail { background-color: #dc3545; }
        .status-skip { background-color: #ffc107; }
        .summary { background: #e9ecef; padding: 20px; border-radius: 8px; margin-top: 30px; text-align: center; }
        .error-details { color: #dc3545; font-size: 0.9em; margin-top: 5px; }
        .progress-bar { width: 100%; height: 20px; background-color: #e9ecef; border-radius: 10px; overflow: hidden; margin: 10px 0; }
        .progress-fill { height: 100%; background-color: #28a745; }
"#;

/// Render the report as a standalone HTML document.
///
/// An empty run renders a `0.0%` pass rate.
pub fn render_html(report: &TestReport) -> String {
    let suite = escape_html(&report.test_suite);
    let rate = report.pass_rate().unwrap_or(0.0);
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("    <meta charset=\"UTF-8\">\n");
    out.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    out.push_str(&format!("    <title>{suite} Report</title>\n"));
    out.push_str("    <style>\n");
    out.push_str(STYLE);
    out.push_str("    </style>\n</head>\n<body>\n    <div class=\"container\">\n");

    out.push_str("        <div class=\"header\">\n");
    out.push_str(&format!("            <h1>🧪 {suite} Report</h1>\n"));
    out.push_str(&format!(
        "            <p><strong>Test Suite:</strong> {suite}</p>\n"
    ));
    out.push_str(&format!(
        "            <p><strong>Execution Time:</strong> {} to {}</p>\n",
        report.start_time.format(TIMESTAMP_FORMAT),
        report.end_time.format(TIMESTAMP_FORMAT)
    ));
    out.push_str(&format!(
        "            <p><strong>Duration:</strong> {}</p>\n",
        format_duration(report.duration)
    ));
    out.push_str("        </div>\n\n");

    out.push_str("        <div class=\"stats\">\n");
    stat_card(&mut out, report.total_tests, "Total Tests", None);
    stat_card(&mut out, report.passed_tests, "Passed", Some("#28a745"));
    stat_card(&mut out, report.failed_tests, "Failed", Some("#dc3545"));
    stat_card(&mut out, report.skipped_tests, "Skipped", Some("#ffc107"));
    out.push_str("        </div>\n\n");

    out.push_str("        <div>\n");
    out.push_str(&format!("            <h3>Pass Rate: {rate:.1}%</h3>\n"));
    out.push_str("            <div class=\"progress-bar\">\n");
    out.push_str(&format!(
        "                <div class=\"progress-fill\" style=\"width: {rate:.1}%;\"></div>\n"
    ));
    out.push_str("            </div>\n        </div>\n\n");

    out.push_str("        <div class=\"test-results\">\n");
    out.push_str("            <h2>📋 Test Results</h2>\n");
    for outcome in &report.results {
        outcome_item(&mut out, outcome);
    }
    out.push_str("        </div>\n\n");

    out.push_str("        <div class=\"summary\">\n");
    out.push_str("            <h2>📝 Summary</h2>\n");
    out.push_str(&format!(
        "            <p><strong>{}</strong></p>\n",
        escape_html(&report.summary)
    ));
    out.push_str("        </div>\n    </div>\n</body>\n</html>\n");
    out
}

fn stat_card(out: &mut String, value: usize, label: &str, color: Option<&str>) {
    let style = color
        .map(|c| format!(" style=\"color: {c};\""))
        .unwrap_or_default();
    out.push_str("            <div class=\"stat-card\">\n");
    out.push_str(&format!(
        "                <div class=\"stat-number\"{style}>{value}</div>\n"
    ));
    out.push_str(&format!(
        "                <div class=\"stat-label\">{label}</div>\n"
    ));
    out.push_str("            </div>\n");
}

fn outcome_item(out: &mut String, outcome: &TestOutcome) {
    let (class, badge) = match outcome.status {
        TestStatus::Pass => ("pass", "✅ PASS"),
        TestStatus::Fail => ("fail", "❌ FAIL"),
        TestStatus::Skip => ("skip", "⏭️ SKIP"),
    };

    out.push_str(&format!(
        "            <div class=\"test-item test-{class}\">\n"
    ));
    out.push_str("                <div>\n");
    out.push_str(&format!(
        "                    <strong>{}</strong>\n",
        escape_html(&outcome.name)
    ));
    out.push_str(&format!(
        "                    <div style=\"color: #6c757d; font-size: 0.9em;\">Duration: {}</div>\n",
        format_duration(outcome.duration)
    ));
    if let Some(error) = &outcome.error {
        out.push_str(&format!(
            "                    <div class=\"error-details\">Error: {}</div>\n",
            escape_html(error)
        ));
    }
    out.push_str("                </div>\n");
    out.push_str(&format!(
        "                <span class=\"status status-{class}\">{badge}</span>\n"
    ));
    out.push_str("            </div>\n");
}

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
