//! credbroker - short-lived cloud credentials from an encrypted local store.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use credbroker::cli::output;
use credbroker::cli::{execute, Cli, Settings};
use credbroker::error::{ConfigError, Error, StsError, ValidationError};

fn hint(e: &Error) -> Option<&'static str> {
    match e {
        Error::Config(ConfigError::NotFound(_)) => Some("run: credbroker init"),
        Error::Config(ConfigError::AlreadyExists(_)) => {
            Some("edit the existing file or pass --config <PATH>")
        }
        Error::Validation(ValidationError::NoProfiles) => {
            Some("add a [[profiles]] entry to your configuration file")
        }
        Error::Validation(ValidationError::NotInteractive(_)) => {
            Some("run from a terminal, or name the action explicitly")
        }
        Error::Sts(StsError::Unauthenticated(_)) => {
            Some("check the access keys saved for this profile")
        }
        Error::Sts(StsError::DurationExceedsRoleLimit { .. }) => {
            Some("pick a shorter duration or raise the role's maximum session duration")
        }
        _ => None,
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("CREDBROKER_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("credbroker=debug")
        } else {
            EnvFilter::new("credbroker=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    let result = Settings::from_cli(&cli).and_then(|settings| execute(cli.command, &settings));
    if let Err(e) = result {
        output::error(&e.to_string());
        if let Some(hint) = hint(&e) {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
