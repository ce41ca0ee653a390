use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

use daily_brief::build::BuildOutcome;
use daily_brief::cli::{Cli, Command};

/// Exit status when there is no snapshot to build from.
const EXIT_MISSING_SNAPSHOT: u8 = 2;

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> anyhow::Result<ExitCode> {
    daily_brief::logging::init().context("init logging")?;

    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        Command::Build(args) => match daily_brief::build::run(args).context("build")? {
            BuildOutcome::Built(report) => {
                println!(
                    "Successfully built Dashboard & Archive: {}",
                    daily_brief::page::iso_date(report.date)
                );
                Ok(ExitCode::SUCCESS)
            }
            BuildOutcome::MissingSnapshot { snapshot_path } => {
                eprintln!(
                    "WARNING: no snapshot at {}; nothing was built",
                    snapshot_path.display()
                );
                Ok(ExitCode::from(EXIT_MISSING_SNAPSHOT))
            }
        },
        Command::Index(args) => {
            let report = daily_brief::build::run_index(args).context("index")?;
            println!(
                "Rebuilt archive index with {} entries: {}",
                report.entries,
                report.index_path.display()
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}
