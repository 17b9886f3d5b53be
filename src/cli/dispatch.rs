use anyhow::Result;
use plancheck::commands::{render, run, validate};

use super::types::Commands;

/// Run the selected command; `Ok(false)` means at least one check failed
pub fn dispatch(command: Commands) -> Result<bool> {
    match command {
        Commands::Validate { plan, rules } => validate::execute(&plan, &rules),
        Commands::Run {
            suite,
            report,
            report_file,
            html_file,
            config,
            sequential,
        } => run::execute(
            &suite,
            run::RunOptions {
                report,
                report_file,
                html_file,
                config,
                sequential,
            },
        ),
        Commands::Render {
            report,
            html_file,
            summary_file,
        } => render::execute(&report, html_file, summary_file),
    }
}
