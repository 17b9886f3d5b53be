//! Suite runs through the library API

use plancheck::config::RunConfig;
use plancheck::render::{parse_json, render_json};
use plancheck::suite::run_suite_file;

use super::{ses_plan, ses_suite, workspace};

#[cfg(unix)]
#[test]
fn test_suite_parallel_and_sequential_agree() {
    let temp = workspace(&[("plan.json", &ses_plan()), ("suite.yaml", &ses_suite())]).unwrap();
    let suite = temp.path().join("suite.yaml");

    let parallel = run_suite_file(&suite, &RunConfig::default()).unwrap();
    let sequential = run_suite_file(
        &suite,
        &RunConfig {
            parallel: false,
            ..RunConfig::default()
        },
    )
    .unwrap();

    for report in [&parallel, &sequential] {
        assert_eq!(report.test_suite, "Terraform AWS SES Tests");
        assert_eq!(report.total_tests, 5);
        assert_eq!(report.passed_tests, 2);
        assert_eq!(report.failed_tests, 2);
        assert_eq!(report.skipped_tests, 1);
        assert!(report.check_consistency().is_ok());
    }

    let mut names: Vec<_> = parallel.results.iter().map(|o| o.name.clone()).collect();
    let mut expected: Vec<_> = sequential.results.iter().map(|o| o.name.clone()).collect();
    names.sort();
    expected.sort();
    assert_eq!(names, expected);
}

#[cfg(unix)]
#[test]
fn test_suite_report_round_trips() {
    let temp = workspace(&[("plan.json", &ses_plan()), ("suite.yaml", &ses_suite())]).unwrap();
    let report = run_suite_file(&temp.path().join("suite.yaml"), &RunConfig::default()).unwrap();

    let restored = parse_json(&render_json(&report).unwrap()).unwrap();
    assert_eq!(restored, report);
}

#[test]
fn test_suite_with_missing_plan_fails_plan_checks() {
    let temp = workspace(&[("suite.yaml", &ses_suite())]).unwrap();
    let report = run_suite_file(
        &temp.path().join("suite.yaml"),
        &RunConfig {
            parallel: false,
            ..RunConfig::default()
        },
    )
    .unwrap();

    let plan_failures: Vec<_> = report
        .results
        .iter()
        .filter(|o| {
            o.error
                .as_deref()
                .is_some_and(|e| e.starts_with("plan could not be loaded"))
        })
        .map(|o| o.name.as_str())
        .collect();
    assert_eq!(plan_failures, ["domain identity", "missing module"]);
}
