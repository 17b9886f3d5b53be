//! Writing every report format for one run

use chrono::{TimeZone, Utc};
use plancheck::config::{FileConfig, ReportConfig, ReportOverrides};
use plancheck::render::{load_report, write_reports, CiStats, ReportKind};
use plancheck::report::{ResultAggregator, TestOutcome};
use std::time::Duration;
use tempfile::TempDir;

fn sample_report() -> plancheck::report::TestReport {
    let aggregator = ResultAggregator::new();
    aggregator.record(TestOutcome::passed("email identity", Duration::from_millis(1500)));
    aggregator.record(TestOutcome::failed(
        "domain identity",
        Duration::from_secs(2),
        "DKIM attributes not found for example.com",
    ));
    aggregator.record(TestOutcome::skipped("dmarc record", Duration::from_millis(20)));
    aggregator.finalize(
        "Terraform AWS SES Tests",
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 1, 30).unwrap(),
    )
}

#[test]
fn test_all_formats_written_and_readable() {
    let temp = TempDir::new().unwrap();
    let file = FileConfig {
        report: plancheck::config::ReportSection {
            stats_file: Some(temp.path().join("stats.json")),
            ..Default::default()
        },
        ..Default::default()
    };
    let overrides = ReportOverrides {
        enabled: true,
        report_file: Some(temp.path().join("report.json")),
        html_file: Some(temp.path().join("report.html")),
        summary_file: None,
    };
    let summary_path = temp.path().join("step-summary.md");
    let config = ReportConfig::resolve(&overrides, &file, |key| {
        (key == "GITHUB_STEP_SUMMARY").then(|| summary_path.display().to_string())
    });

    let report = sample_report();
    let summary = write_reports(&report, &config);
    assert!(summary.is_complete());
    let kinds: Vec<_> = summary.written.iter().map(|(k, _)| *k).collect();
    assert_eq!(
        kinds,
        [
            ReportKind::Json,
            ReportKind::Html,
            ReportKind::CiSummary,
            ReportKind::CiStats
        ]
    );

    let restored = load_report(&temp.path().join("report.json")).unwrap();
    assert_eq!(restored, report);

    let json = std::fs::read_to_string(temp.path().join("report.json")).unwrap();
    assert!(json.contains("\"duration\": \"1m30s\""));
    assert!(json.contains("\"duration\": \"1.5s\""));

    let markdown = std::fs::read_to_string(&summary_path).unwrap();
    assert!(markdown.contains("**domain identity**"));
    assert!(!markdown.contains("**dmarc record**"));

    let stats: CiStats =
        serde_json::from_str(&std::fs::read_to_string(temp.path().join("stats.json")).unwrap())
            .unwrap();
    assert_eq!((stats.total, stats.passed, stats.failed, stats.skipped), (3, 1, 1, 1));
    assert_eq!(stats.summary, "❌ 1/3 tests failed, 1 passed");

    let html = std::fs::read_to_string(temp.path().join("report.html")).unwrap();
    assert!(html.contains("Pass Rate: 33.3%"));
}

#[test]
fn test_one_unwritable_target_does_not_stop_the_rest() {
    let temp = TempDir::new().unwrap();
    let config = ReportConfig {
        enabled: true,
        report_file: temp.path().join("no-such-dir").join("report.json"),
        html_file: temp.path().join("report.html"),
        summary_file: temp.path().join("summary.md"),
        stats_file: temp.path().join("stats.json"),
    };

    let summary = write_reports(&sample_report(), &config);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].0, ReportKind::Json);
    assert!(temp.path().join("report.html").exists());
    assert!(temp.path().join("summary.md").exists());
    assert!(temp.path().join("stats.json").exists());
}
