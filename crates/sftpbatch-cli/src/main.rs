// sftpbatch CLI
//
// Usage: sftpbatch <control-file>
//
// sftmCredentialFile=/etc/sftm/secrets sftpbatch nightly.ctl
// RUST_LOG=debug sftpbatch nightly.ctl   (session internals)

use std::env;
use std::process::ExitCode;

use sftpbatch_core::{logging, RunnerConfig, PROGRAM_NAME, PROGRAM_VERSION};

mod runner;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = RunnerConfig::from_env();
    logging::init(&config);

    print_header();

    let args: Vec<String> = env::args().collect();

    match runner::run(&args, &config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(failure) if failure.exits_cleanly() => {
            println!("{}", failure);
            ExitCode::SUCCESS
        }
        Err(failure) => {
            tracing::error!("{}", failure);
            ExitCode::FAILURE
        }
    }
}

fn print_header() {
    let title = format!("{} Version {}", PROGRAM_NAME, PROGRAM_VERSION);
    println!("{}", title);
    println!("{}", "-".repeat(title.len()));
}
