//! End-to-end tests for plancheck
//!
//! Exercises plan validation, suite runs and report rendering through the
//! library API and through the `plancheck` binary.

pub mod cli;
pub mod fixtures;
pub mod helpers;
pub mod plan_validation;
pub mod report_rendering;
pub mod suite_run;

pub use fixtures::*;
pub use helpers::*;
