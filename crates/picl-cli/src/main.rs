//! picl - Maybe the dumbest package manager ever

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use picl_cli::ui::Output;
use picl_cli::{DispatchError, Dispatcher};
use picl_core::{FsRemover, HttpInstaller, Reporter};

/// Environment variable holding the log filter (e.g. `PICL_LOG=debug`).
const LOG_ENV: &str = "PICL_LOG";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let output = Output::new();

    let installer = match HttpInstaller::new() {
        Ok(installer) => installer,
        Err(e) => {
            output.error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let mut dispatcher = Dispatcher::new(installer, FsRemover, output);
    match dispatcher.run(std::env::args_os()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match &e {
                // clap formats its own usage errors, help and version text
                DispatchError::ArgParse(clap_err) => {
                    let _ = clap_err.print();
                }
                other => output.error(&other.to_string()),
            }
            ExitCode::from(e.exit_code())
        }
    }
}
