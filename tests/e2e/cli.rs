//! The `plancheck` binary

use super::{mixed_rules, passing_rules, plancheck, ses_plan, ses_suite, stdout, workspace};

#[test]
fn test_validate_passing_exits_zero() {
    let temp = workspace(&[("plan.json", &ses_plan()), ("rules.yaml", &passing_rules())]).unwrap();
    let output = plancheck(
        temp.path(),
        &["validate", "plan.json", "--rules", "rules.yaml"],
    )
    .unwrap();

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("🧪 TEST REPORT"));
    assert!(out.contains("✅ ALL TESTS PASSED! 4/4 tests successful"));
}

#[test]
fn test_validate_failing_exits_one() {
    let temp = workspace(&[("plan.json", &ses_plan()), ("rules.yaml", &mixed_rules())]).unwrap();
    let output = plancheck(
        temp.path(),
        &["validate", "plan.json", "--rules", "rules.yaml"],
    )
    .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("❌ 1/3 tests failed, 1 passed"));
}

#[cfg(unix)]
#[test]
fn test_run_writes_reports_and_rerenders() {
    let temp = workspace(&[
        ("plan.json", &ses_plan()),
        ("suite.yaml", &ses_suite()),
        ("plancheck.toml", "[run]\nparallel = false\n"),
    ])
    .unwrap();

    let output = plancheck(
        temp.path(),
        &["run", "suite.yaml", "--report", "--html-file", "out.html"],
    )
    .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("📅 Test Suite: Terraform AWS SES Tests"));
    assert!(out.contains("JSON report saved to test-report.json"));

    for name in ["test-report.json", "out.html", "test-summary.md", "test-results.json"] {
        assert!(temp.path().join(name).exists(), "{name} missing");
    }

    let output = plancheck(
        temp.path(),
        &["render", "test-report.json", "--summary-file", "again.md"],
    )
    .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        std::fs::read_to_string(temp.path().join("again.md")).unwrap(),
        std::fs::read_to_string(temp.path().join("test-summary.md")).unwrap()
    );
}

#[test]
fn test_run_without_report_writes_nothing() {
    let temp = workspace(&[(
        "suite.yaml",
        "name: empty\ncommands: []\n",
    )])
    .unwrap();
    let output = plancheck(temp.path(), &["run", "suite.yaml"]).unwrap();

    assert!(output.status.success());
    assert!(!stdout(&output).contains("Pass Rate"));
    assert!(!temp.path().join("test-report.json").exists());
}

#[test]
fn test_bad_config_file_is_reported() {
    let temp = workspace(&[
        ("suite.yaml", "name: empty\n"),
        ("plancheck.toml", "[run]\nretries = 3\n"),
    ])
    .unwrap();
    let output = plancheck(temp.path(), &["run", "suite.yaml"]).unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to parse config file"));
}
