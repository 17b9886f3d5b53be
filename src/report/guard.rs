//! Failure boundary around a single check
//!
//! Every check runs through [`run_guarded`] (or its timed variant), which turns
//! success, skip, error, panic and timeout into exactly one [`TestOutcome`].

use anyhow::Result;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use super::aggregator::ResultAggregator;
use super::duration::format_duration;
use super::outcome::{CheckVerdict, TestOutcome, TestStatus};

/// Run `check` and convert whatever happens into an outcome
pub fn run_guarded<F>(name: &str, check: F) -> TestOutcome
where
    F: FnOnce() -> Result<CheckVerdict>,
{
    let start = Instant::now();
    let result = panic::catch_unwind(AssertUnwindSafe(check));
    into_outcome(name, start.elapsed(), result)
}

/// Run `check` on its own thread, recording a failure if it does not finish
/// within `timeout`.
///
/// A check that overruns is abandoned, not killed; its thread keeps running
/// until it returns and its result is discarded.
pub fn run_guarded_with_timeout<F>(name: &str, timeout: Duration, check: F) -> TestOutcome
where
    F: FnOnce() -> Result<CheckVerdict> + Send + 'static,
{
    let start = Instant::now();
    let (tx, rx) = mpsc::channel();

    let spawned = thread::Builder::new()
        .name(format!("check:{name}"))
        .spawn(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(check));
            let _ = tx.send(result);
        });
    if let Err(e) = spawned {
        return TestOutcome::failed(
            name,
            start.elapsed(),
            format!("failed to start check thread: {e}"),
        );
    }

    match rx.recv_timeout(timeout) {
        Ok(result) => into_outcome(name, start.elapsed(), result),
        Err(RecvTimeoutError::Timeout) => {
            warn!(check = %name, timeout = %format_duration(timeout), "check timed out");
            TestOutcome::failed(
                name,
                start.elapsed(),
                format!("timed out after {}", format_duration(timeout)),
            )
        }
        Err(RecvTimeoutError::Disconnected) => TestOutcome::failed(
            name,
            start.elapsed(),
            "check thread exited without reporting a result",
        ),
    }
}

fn into_outcome(
    name: &str,
    duration: Duration,
    result: thread::Result<Result<CheckVerdict>>,
) -> TestOutcome {
    match result {
        Ok(Ok(CheckVerdict::Passed)) => TestOutcome::passed(name, duration),
        Ok(Ok(CheckVerdict::Skipped { reason })) => {
            info!(check = %name, %reason, "check skipped");
            TestOutcome::skipped(name, duration)
        }
        Ok(Err(e)) => TestOutcome::failed(name, duration, format!("{e:#}")),
        Err(payload) => TestOutcome::failed(
            name,
            duration,
            format!("panic occurred: {}", panic_message(payload.as_ref())),
        ),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

impl ResultAggregator {
    /// Run a check inside the failure boundary and record its outcome
    pub fn run_check<F>(&self, name: &str, check: F) -> TestStatus
    where
        F: FnOnce() -> Result<CheckVerdict>,
    {
        let outcome = run_guarded(name, check);
        let status = outcome.status;
        self.record(outcome);
        status
    }
}
