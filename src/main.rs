use anyhow::Context;
use clap::Parser;
use geo_country_enricher::cli::{run, Cli, RunOutcome};
use geo_country_enricher::utils::init_logging;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_deref()).context("Failed to set up logging")?;

    match run(cli).await? {
        RunOutcome::Completed => Ok(ExitCode::SUCCESS),
        RunOutcome::SaveDeclined => {
            eprintln!("File not saved. Exiting program.");
            Ok(ExitCode::FAILURE)
        }
    }
}
