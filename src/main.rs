#![forbid(unsafe_code)]

mod cli;
mod pipeline;

use std::process::ExitCode;

use clap::Parser;

fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = cli::Cli::parse();
    match pipeline::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
