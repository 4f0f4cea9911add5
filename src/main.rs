//! Mailforge - compose HTML email documents from reusable modules.
//!
//! Headless command-line front end over the module repository and project
//! composition engine.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mailforge::cli::{Cli, ExitCode};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so stdout stays clean for HTML/JSON
    let filter = if cli.global.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = cli.execute() {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code.code());
    }

    std::process::exit(ExitCode::Success.code());
}
