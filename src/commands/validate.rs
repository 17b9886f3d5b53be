//! `plancheck validate <PLAN> --rules <RULES>`

use anyhow::Result;
use chrono::Utc;
use std::path::Path;
use tracing::info;

use crate::plan::{evaluate_check, load_plan, load_plan_checks};
use crate::render::render_console;
use crate::report::{ResultAggregator, TestReport};

pub const VALIDATE_SUITE_NAME: &str = "Plan Validation";

/// Evaluate every rule against the plan, one outcome per rule
pub fn validate_plan(plan_path: &Path, rules_path: &Path) -> Result<TestReport> {
    let rules = load_plan_checks(rules_path)?;
    let tree = load_plan(plan_path)?;
    info!(checks = rules.checks.len(), plan = %plan_path.display(), "validating plan");

    let aggregator = ResultAggregator::new();
    let start_time = Utc::now();
    for check in &rules.checks {
        aggregator.run_check(&check.name, || Ok(evaluate_check(&tree, check)?));
    }
    Ok(aggregator.finalize(VALIDATE_SUITE_NAME, start_time, Utc::now()))
}

/// Print the console report; returns whether every check passed
pub fn execute(plan_path: &Path, rules_path: &Path) -> Result<bool> {
    let report = validate_plan(plan_path, rules_path)?;
    print!("{}", render_console(&report));
    Ok(report.all_passed())
}
