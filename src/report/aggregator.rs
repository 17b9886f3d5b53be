//! Thread-safe collection of outcomes for one run

use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, error};

use super::model::TestReport;
use super::outcome::TestOutcome;

/// Collects outcomes from concurrently running checks.
///
/// Construct one per run and share it by reference (or `Arc`) with every
/// check. The caller must join all checks before calling [`finalize`].
///
/// [`finalize`]: ResultAggregator::finalize
#[derive(Debug, Default)]
pub struct ResultAggregator {
    outcomes: Mutex<Vec<TestOutcome>>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an outcome in completion order
    pub fn record(&self, outcome: TestOutcome) {
        debug!(check = %outcome.name, status = %outcome.status, "recorded outcome");
        self.lock().push(outcome);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the outcomes recorded so far
    pub fn snapshot(&self) -> Vec<TestOutcome> {
        self.lock().clone()
    }

    /// Build the report from everything recorded. Does not drain the
    /// aggregator, so calling it twice yields identical reports.
    pub fn finalize(
        &self,
        suite: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> TestReport {
        let report = TestReport::from_outcomes(suite, start_time, end_time, self.snapshot());
        if let Err(e) = report.check_consistency() {
            error!("{e}");
        }
        report
    }

    /// Consume the aggregator and return its outcomes
    pub fn into_outcomes(self) -> Vec<TestOutcome> {
        self.outcomes
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // A check that panicked while holding the lock must not cost us the
    // outcomes already recorded.
    fn lock(&self) -> MutexGuard<'_, Vec<TestOutcome>> {
        self.outcomes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
