//! image-manager CLI
//!
//! Checks one VM image template on S3-compatible storage against the expiry
//! threshold and optionally removes it. See `exit.rs` for exit codes.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

mod args;
mod exit;
mod logging;
mod run;

use args::Cli;
use exit::ExitStatus;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = cli.validate() {
        let _ = e.print();
        return ExitStatus::Usage.into();
    }

    // logs → stderr, result lines → stdout
    if let Err(e) = logging::init_logging(cli.verbosity()) {
        eprintln!("cannot initialize logging: {e}");
        return ExitStatus::OperationalError.into();
    }

    match run::execute(&cli).await {
        Ok(status) => status.into(),
        Err(e) => {
            error!("{e}");
            ExitStatus::from_error(&e).into()
        }
    }
}
