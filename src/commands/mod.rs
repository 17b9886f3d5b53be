//! Command implementations behind the CLI
//!
//! Each command prints the console report and returns whether every check
//! passed, leaving the process exit code to the caller.

pub mod render;
pub mod run;
pub mod validate;
