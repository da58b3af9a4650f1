use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use psrs::bench::bench;
use psrs::cli::Cli;
use psrs::output::write_report;

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::from(err.exit_code() as u8);
        }
    };

    let binary = config.binary;

    match bench(&config) {
        Ok(report) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            let result = write_report(&mut handle, &report, binary)
                .context("failed to write the report to stdout");
            if let Err(err) = result {
                log::error!("{err:#}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
