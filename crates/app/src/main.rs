//! Emporium Promotion Builder CLI

use std::process;

use clap::Parser;
use tracing::error;

use emporium_app::observability;

use crate::cli::Cli;

mod cli;

#[tokio::main]
pub async fn main() {
    _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(init_error) = observability::init(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("{init_error}");
        }

        process::exit(1);
    }

    if let Err(command_error) = cli.run().await {
        error!(error = %command_error, "command failed");

        #[expect(
            clippy::print_stderr,
            reason = "the command error is the user-facing output"
        )]
        {
            eprintln!("{command_error}");
        }

        process::exit(1);
    }
}
