use std::io;
use std::process::ExitCode;

use clap::Parser;
use cpr_sniffer::cli::{self, CliConfig};
use cpr_sniffer::logger;

fn main() -> ExitCode {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!(?config, "starting cpr-sniff");

    let mut out = io::stdout().lock();
    match cli::run(&config, &mut out) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("cpr-sniff failed: {e:#}");
            eprintln!("cpr-sniff: {e:#}");
            ExitCode::from(2)
        }
    }
}
