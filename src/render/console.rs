//! Plain-text console report

use crate::report::{format_duration, TestReport, TestStatus};

pub const BANNER_WIDTH: usize = 80;

/// Timestamp layout shared by the console and HTML reports
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Render the full console report. Contains no colour codes, so the output
/// is identical for identical reports.
pub fn render_console(report: &TestReport) -> String {
    let heavy = "=".repeat(BANNER_WIDTH);
    let light = "-".repeat(BANNER_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("\n{heavy}\n"));
    out.push_str("🧪 TEST REPORT\n");
    out.push_str(&format!("{heavy}\n"));

    out.push_str(&format!("📅 Test Suite: {}\n", report.test_suite));
    out.push_str(&format!(
        "⏰ Start Time: {}\n",
        report.start_time.format(TIMESTAMP_FORMAT)
    ));
    out.push_str(&format!(
        "⏰ End Time:   {}\n",
        report.end_time.format(TIMESTAMP_FORMAT)
    ));
    out.push_str(&format!(
        "⏱️  Duration:   {}\n",
        format_duration(report.duration)
    ));

    section(&mut out, &light, "📊 TEST STATISTICS");
    out.push_str(&format!("📈 Total Tests:   {}\n", report.total_tests));
    out.push_str(&format!("✅ Passed Tests:  {}\n", report.passed_tests));
    out.push_str(&format!("❌ Failed Tests:  {}\n", report.failed_tests));
    out.push_str(&format!("⏭️  Skipped Tests: {}\n", report.skipped_tests));
    if let Some(rate) = report.pass_rate() {
        out.push_str(&format!("📊 Pass Rate:     {rate:.1}%\n"));
    }

    section(&mut out, &light, "📋 DETAILED TEST RESULTS");
    for (i, outcome) in report.results.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} - {} ({})\n",
            i + 1,
            outcome.name,
            status_glyph(outcome.status),
            format_duration(outcome.duration)
        ));
        if let Some(error) = &outcome.error {
            out.push_str(&format!("   Error: {error}\n"));
        }
    }

    section(&mut out, &light, "📝 SUMMARY");
    out.push_str(&format!("{}\n", report.summary));

    if report.all_passed() {
        out.push_str("\n🎉 Congratulations! All tests passed successfully!\n");
    } else {
        out.push_str("\n⚠️  Some tests failed. Please review the errors above and fix the issues.\n");
        out.push_str("💡 Check the test logs for more detailed error information.\n");
    }

    out.push_str(&format!("\n{heavy}\n"));
    out
}

fn section(out: &mut String, rule: &str, title: &str) {
    out.push_str(&format!("\n{rule}\n{title}\n{rule}\n"));
}

fn status_glyph(status: TestStatus) -> &'static str {
    match status {
        TestStatus::Pass => "✅ PASS",
        TestStatus::Fail => "❌ FAIL",
        TestStatus::Skip => "⏭️  SKIP",
    }
}
