//! Outcome aggregation
//!
//! Checks report into a [`ResultAggregator`] through the failure boundary in
//! [`run_guarded`]. Once every check has finished, [`ResultAggregator::finalize`]
//! tallies the outcomes into a [`TestReport`].

mod aggregator;
pub mod duration;
mod guard;
mod model;
mod outcome;


pub use aggregator::ResultAggregator;
pub use duration::{format_duration, parse_duration, DurationParseError};
pub use guard::{run_guarded, run_guarded_with_timeout};
pub use model::{summary_line, AggregationInconsistency, TestReport};
pub use outcome::{CheckVerdict, TestOutcome, TestStatus};
