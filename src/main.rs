use anyhow::Result;
use clap::Parser;

mod cli;

use cli::{dispatch, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    plancheck::logging::init_tracing(cli.verbose);

    if !dispatch(cli.command)? {
        std::process::exit(1);
    }
    Ok(())
}
