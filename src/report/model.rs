//! Aggregate report over a completed run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use super::outcome::{TestOutcome, TestStatus};

/// Counts in a report disagree with each other or with its outcomes
#[derive(Debug, Error, PartialEq, Eq)]
#[error("report counts are inconsistent: total {total} != passed {passed} + failed {failed} + skipped {skipped} (outcomes: {outcomes})")]
pub struct AggregationInconsistency {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub outcomes: usize,
}

/// Statistics and outcomes for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestReport {
    pub test_suite: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(with = "super::duration::text")]
    pub duration: Duration,
    pub total_tests: usize,
    pub passed_tests: usize,
    pub failed_tests: usize,
    pub skipped_tests: usize,
    pub results: Vec<TestOutcome>,
    pub summary: String,
}

impl TestReport {
    /// Tally `results` into a report. Pure: identical inputs give identical reports.
    pub fn from_outcomes(
        suite: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        results: Vec<TestOutcome>,
    ) -> Self {
        let (mut passed, mut failed, mut skipped) = (0, 0, 0);
        for outcome in &results {
            match outcome.status {
                TestStatus::Pass => passed += 1,
                TestStatus::Fail => failed += 1,
                TestStatus::Skip => skipped += 1,
            }
        }
        let total = results.len();

        Self {
            test_suite: suite.into(),
            start_time,
            end_time,
            duration: (end_time - start_time).to_std().unwrap_or_default(),
            total_tests: total,
            passed_tests: passed,
            failed_tests: failed,
            skipped_tests: skipped,
            results,
            summary: summary_line(passed, failed, total),
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed_tests == 0
    }

    /// Percentage of passed outcomes, or `None` for an empty run
    pub fn pass_rate(&self) -> Option<f64> {
        if self.total_tests == 0 {
            None
        } else {
            Some(self.passed_tests as f64 / self.total_tests as f64 * 100.0)
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &TestOutcome> {
        self.results.iter().filter(|o| o.is_failure())
    }

    /// Verify the tally; a mismatch means the recording path lost or duplicated outcomes
    pub fn check_consistency(&self) -> Result<(), AggregationInconsistency> {
        let counted = self.passed_tests + self.failed_tests + self.skipped_tests;
        if counted == self.total_tests && self.total_tests == self.results.len() {
            Ok(())
        } else {
            Err(AggregationInconsistency {
                total: self.total_tests,
                passed: self.passed_tests,
                failed: self.failed_tests,
                skipped: self.skipped_tests,
                outcomes: self.results.len(),
            })
        }
    }
}

/// One-line human summary derived from the counts
pub fn summary_line(passed: usize, failed: usize, total: usize) -> String {
    if failed == 0 {
        format!("✅ ALL TESTS PASSED! {passed}/{total} tests successful")
    } else {
        format!("❌ {failed}/{total} tests failed, {passed} passed")
    }
}
