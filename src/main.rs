use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::info;

use u_hyperheur::experiment::{Cli, Orchestrator};
use u_hyperheur::logging;

fn main() -> anyhow::Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return Ok(match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            });
        }
    };

    logging::init_tracing(&cli.log_level);

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}\n\n{}", Cli::command().render_usage());
            return Ok(ExitCode::FAILURE);
        }
    };

    let problem = config.problem;
    let summary = Orchestrator::new(config)
        .run()
        .with_context(|| format!("{problem} batch failed"))?;
    info!(
        output = %summary.output.display(),
        completed = summary.completed_runs,
        failed = summary.failed_runs,
        "done"
    );
    Ok(ExitCode::SUCCESS)
}
