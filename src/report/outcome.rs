//! Outcome of a single named check

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Terminal status of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Pass,
    Fail,
    Skip,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pass => write!(f, "PASS"),
            TestStatus::Fail => write!(f, "FAIL"),
            TestStatus::Skip => write!(f, "SKIP"),
        }
    }
}

/// Result of one check, immutable once recorded.
///
/// `error` is only ever set on failed outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub name: String,
    pub status: TestStatus,
    #[serde(with = "super::duration::text")]
    pub duration: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TestOutcome {
    pub fn passed(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Pass,
            duration,
            error: None,
        }
    }

    /// A failed outcome; an empty message leaves `error` unset
    pub fn failed(name: impl Into<String>, duration: Duration, error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            name: name.into(),
            status: TestStatus::Fail,
            duration,
            error: (!error.trim().is_empty()).then_some(error),
        }
    }

    pub fn skipped(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Skip,
            duration,
            error: None,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.status == TestStatus::Fail
    }
}

/// What a check reports when it completes without error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckVerdict {
    Passed,
    /// The check did not apply, e.g. the feature it covers is disabled
    Skipped { reason: String },
}

impl CheckVerdict {
    pub fn skipped(reason: impl Into<String>) -> Self {
        CheckVerdict::Skipped {
            reason: reason.into(),
        }
    }
}
