use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plancheck")]
#[command(about = "Validate infrastructure plans and report deployment check results", long_about = None)]
#[command(version)]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug); PLANCHECK_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate declarative checks against a plan or state document
    Validate {
        /// Path to the plan JSON (`terraform show -json` output)
        plan: PathBuf,

        /// YAML file of plan checks
        #[arg(short, long)]
        rules: PathBuf,
    },

    /// Run a check battery and report the results
    Run {
        /// Suite YAML file
        suite: PathBuf,

        /// Write JSON, HTML and CI summary reports
        #[arg(long)]
        report: bool,

        /// Path for the JSON report (default: test-report.json)
        #[arg(long)]
        report_file: Option<PathBuf>,

        /// Path for the HTML report (default: test-report.html)
        #[arg(long)]
        html_file: Option<PathBuf>,

        /// Config file (default: ./plancheck.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Run checks one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Re-render a saved JSON report
    Render {
        /// JSON report written by `run --report`
        report: PathBuf,

        /// Also write an HTML report here
        #[arg(long)]
        html_file: Option<PathBuf>,

        /// Also write a Markdown CI summary here
        #[arg(long)]
        summary_file: Option<PathBuf>,
    },
}
