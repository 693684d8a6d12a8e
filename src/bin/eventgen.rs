use openapi_eventgen::cli::run_cli;
use openapi_eventgen::logging::{init_logging, LogConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = init_logging(&LogConfig::from_env()) {
        eprintln!("Warning: {e:#}");
    }
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {e:#}");
            ExitCode::FAILURE
        }
    }
}
