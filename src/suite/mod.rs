//! Check batteries
//!
//! A suite file names a plan document, declarative plan checks and shell
//! commands. [`run_suite`] executes them all, in parallel by default, and
//! produces one [`TestReport`](crate::report::TestReport).

mod command;
mod runner;
mod schema;


pub use command::{run_command, tail_lines, CommandResult};
pub use runner::{run_suite, run_suite_file};
pub use schema::{load_suite, parse_suite, validate_suite, CommandCheck, SuiteDefinition, SuiteError};
