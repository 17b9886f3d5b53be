//! Battery execution
//!
//! Every check runs inside the failure boundary and records exactly one
//! outcome into a shared [`ResultAggregator`]. In parallel mode each check gets
//! its own scoped thread; the scope joins them all before the report is
//! finalized.

use anyhow::{anyhow, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{error, info};

use super::command::run_command;
use super::schema::{load_suite, CommandCheck, SuiteDefinition};
use crate::config::{RunConfig, DEFAULT_SUITE_NAME};
use crate::plan::{evaluate_check, load_plan, PlanCheck, PlanTree};
use crate::report::{
    run_guarded_with_timeout, CheckVerdict, ResultAggregator, TestOutcome, TestReport,
};

/// Shared, read-only state for one run
struct RunContext {
    base_dir: PathBuf,
    /// Decoded plan, or the rendered load error
    plan: Option<Result<Arc<PlanTree>, String>>,
    timeout: Duration,
}

enum Check<'a> {
    Plan(&'a PlanCheck),
    Command(&'a CommandCheck),
}

impl Check<'_> {
    fn name(&self) -> &str {
        match self {
            Check::Plan(check) => &check.name,
            Check::Command(command) => &command.name,
        }
    }
}

/// Load a suite file and run it; relative paths resolve against its directory
pub fn run_suite_file(path: &Path, config: &RunConfig) -> Result<TestReport> {
    let suite = load_suite(path)?;
    let base_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    Ok(run_suite(&suite, base_dir, config))
}

/// Run every check in `suite` and tally the outcomes
pub fn run_suite(suite: &SuiteDefinition, base_dir: &Path, config: &RunConfig) -> TestReport {
    let suite_name = suite
        .name
        .clone()
        .or_else(|| config.suite_name.clone())
        .unwrap_or_else(|| DEFAULT_SUITE_NAME.to_string());
    let parallel = config.parallel && suite.parallel.unwrap_or(true);

    let ctx = RunContext {
        base_dir: base_dir.to_path_buf(),
        plan: suite.plan.as_ref().map(|p| load_tree(&base_dir.join(p))),
        timeout: suite
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(config.timeout),
    };

    let checks: Vec<Check<'_>> = suite
        .plan_checks
        .iter()
        .map(Check::Plan)
        .chain(suite.commands.iter().map(Check::Command))
        .collect();

    info!(suite = %suite_name, checks = checks.len(), parallel, "running suite");
    let aggregator = ResultAggregator::new();
    let start_time = Utc::now();

    if parallel {
        thread::scope(|scope| {
            let (ctx, aggregator) = (&ctx, &aggregator);
            for check in &checks {
                let spawned = thread::Builder::new()
                    .name(format!("suite:{}", check.name()))
                    .spawn_scoped(scope, move || execute(check, ctx, aggregator));
                if let Err(e) = spawned {
                    aggregator.record(TestOutcome::failed(
                        check.name(),
                        Duration::ZERO,
                        format!("failed to start check thread: {e}"),
                    ));
                }
            }
        });
    } else {
        for check in &checks {
            execute(check, &ctx, &aggregator);
        }
    }

    aggregator.finalize(&suite_name, start_time, Utc::now())
}

fn load_tree(path: &Path) -> Result<Arc<PlanTree>, String> {
    load_plan(path).map(Arc::new).map_err(|e| {
        error!(path = %path.display(), "plan could not be loaded: {e:#}");
        format!("{e:#}")
    })
}

fn execute(check: &Check<'_>, ctx: &RunContext, aggregator: &ResultAggregator) {
    match check {
        Check::Plan(plan_check) => execute_plan_check(plan_check, ctx, aggregator),
        Check::Command(command) => execute_command(command, ctx, aggregator),
    }
}

fn execute_plan_check(check: &PlanCheck, ctx: &RunContext, aggregator: &ResultAggregator) {
    let tree = match &ctx.plan {
        Some(Ok(tree)) => Arc::clone(tree),
        Some(Err(message)) => {
            aggregator.record(TestOutcome::failed(
                &check.name,
                Duration::ZERO,
                format!("plan could not be loaded: {message}"),
            ));
            return;
        }
        None => {
            aggregator.record(TestOutcome::failed(
                &check.name,
                Duration::ZERO,
                "no plan file configured",
            ));
            return;
        }
    };

    let owned = check.clone();
    let outcome = run_guarded_with_timeout(&check.name, ctx.timeout, move || {
        Ok(evaluate_check(&tree, &owned)?)
    });
    aggregator.record(outcome);
}

fn execute_command(command: &CommandCheck, ctx: &RunContext, aggregator: &ResultAggregator) {
    let timeout = command
        .timeout_secs
        .map(Duration::from_secs)
        .unwrap_or(ctx.timeout);
    let working_dir = match &command.working_dir {
        Some(dir) => ctx.base_dir.join(dir),
        None => ctx.base_dir.clone(),
    };

    aggregator.run_check(&command.name, || {
        if command.skip {
            return Ok(CheckVerdict::skipped("marked skip in suite"));
        }
        let result = run_command(&command.run, Some(&working_dir), timeout)?;
        match result.failure_message(timeout) {
            Some(message) => Err(anyhow!(message)),
            None => Ok(CheckVerdict::Passed),
        }
    });
}
