//! Plan validation against rule files

use plancheck::commands::validate::{validate_plan, VALIDATE_SUITE_NAME};
use plancheck::plan::{
    find_module, find_resource, load_plan, load_plan_checks, ResourceQuery, ValidationFailure,
};
use plancheck::report::TestStatus;

use super::{mixed_rules, passing_rules, ses_plan, workspace};

#[test]
fn test_all_rules_pass() {
    let temp = workspace(&[("plan.json", &ses_plan()), ("rules.yaml", &passing_rules())]).unwrap();
    let report = validate_plan(
        &temp.path().join("plan.json"),
        &temp.path().join("rules.yaml"),
    )
    .unwrap();

    assert_eq!(report.test_suite, VALIDATE_SUITE_NAME);
    assert_eq!(report.total_tests, 4);
    assert!(report.all_passed(), "{:?}", report.results);
    assert_eq!(report.summary, "✅ ALL TESTS PASSED! 4/4 tests successful");
}

#[test]
fn test_mixed_rules_one_outcome_each() {
    let temp = workspace(&[("plan.json", &ses_plan()), ("rules.yaml", &mixed_rules())]).unwrap();
    let report = validate_plan(
        &temp.path().join("plan.json"),
        &temp.path().join("rules.yaml"),
    )
    .unwrap();

    let statuses: Vec<_> = report.results.iter().map(|o| o.status).collect();
    assert_eq!(
        statuses,
        [TestStatus::Pass, TestStatus::Fail, TestStatus::Skip]
    );
    let error = report.results[1].error.as_deref().unwrap();
    assert!(error.contains("attribute 'ttl'"), "{error}");
    assert!(error.contains("number 600"), "{error}");
    assert_eq!(report.summary, "❌ 1/3 tests failed, 1 passed");
}

#[test]
fn test_invalid_rules_rejected_before_running() {
    let temp = workspace(&[
        ("plan.json", &ses_plan()),
        (
            "rules.yaml",
            "checks:\n  - name: bad\n    module: module.ses_domain\n    resource_type: x\n    attributes:\n      - { key: domain }\n      - { key: domain, matches: \"(\" }\n",
        ),
    ])
    .unwrap();

    let err = load_plan_checks(&temp.path().join("rules.yaml")).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("Check 'bad'"), "{message}");
    assert_eq!(message.matches("Check 'bad'").count(), 2, "{message}");
}

#[test]
fn test_plan_file_lookups() {
    let temp = workspace(&[("plan.json", &ses_plan())]).unwrap();
    let tree = load_plan(&temp.path().join("plan.json")).unwrap();

    let module = find_module(&tree, "module.ses_domain").unwrap();
    let dmarc = find_resource(module, |r| {
        ResourceQuery::of_type("aws_route53_record")
            .name_contains("dmarc")
            .matches(r)
    })
    .unwrap();
    assert_eq!(dmarc.name.as_deref(), Some("dmarc_record"));

    assert!(find_module(&tree, "module.ses").is_none());
    assert!(find_module(&tree, "MODULE.SES_DOMAIN").is_none());
}

#[test]
fn test_missing_module_is_structural() {
    let temp = workspace(&[
        ("plan.json", &ses_plan()),
        (
            "rules.yaml",
            "checks:\n  - { name: sns, module: module.sns, resource_type: aws_sns_topic, optional: true }\n",
        ),
    ])
    .unwrap();
    let report = validate_plan(
        &temp.path().join("plan.json"),
        &temp.path().join("rules.yaml"),
    )
    .unwrap();

    assert_eq!(report.failed_tests, 1);
    let expected = ValidationFailure::StructuralMismatch {
        address: "module.sns".to_string(),
    }
    .to_string();
    assert_eq!(report.results[0].error.as_deref(), Some(expected.as_str()));
}

#[test]
fn test_unreadable_plan_is_an_error() {
    let temp = workspace(&[("plan.json", "not json"), ("rules.yaml", &passing_rules())]).unwrap();
    let err = validate_plan(
        &temp.path().join("plan.json"),
        &temp.path().join("rules.yaml"),
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("Plan document is not valid JSON"));
}
