//! Command-line interface.

pub mod completions;
pub mod crypto;
pub mod init;
pub mod login;
pub mod output;
pub mod prompt;
pub mod sessions;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::core::constants;
use crate::core::prompt::{Prompted, Prompter};
use crate::core::store::ConfigStore;
use crate::core::unlock::RetryGate;
use crate::core::vault::Vault;
use crate::error::Result;

/// credbroker - short-lived cloud credentials from an encrypted local store.
#[derive(Parser)]
#[command(
    name = "credbroker",
    about = "Short-lived cloud credentials from an encrypted local store",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file [default: ~/.credbroker/config.toml]
    #[arg(long, global = true, env = "CREDBROKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Give up after this many wrong passphrases (0 = never)
    #[arg(long, global = true, env = "CREDBROKER_MAX_PASSPHRASE_ATTEMPTS")]
    pub max_passphrase_attempts: Option<u32>,

    /// Timeout for identity service calls, in seconds
    #[arg(
        long,
        global = true,
        env = "CREDBROKER_STS_TIMEOUT",
        default_value_t = constants::DEFAULT_STS_TIMEOUT_SECS
    )]
    pub sts_timeout: u64,

    /// Also write the new session to ~/.aws/credentials (plaintext)
    #[arg(
        long,
        global = true,
        env = "CREDBROKER_INSECURE_USE_AWS_CREDENTIALS_FILE"
    )]
    pub write_credentials_file: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create an empty configuration file
    Init,

    /// Assume a role and cache the session
    Login,

    /// Encrypt, decrypt or re-key the configuration
    Crypto {
        #[command(subcommand)]
        action: Option<CryptoAction>,
    },

    /// List cached sessions
    Sessions {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Crypto subcommands.
#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CryptoAction {
    /// Encrypt a plaintext configuration
    Encrypt,
    /// Store the configuration as plaintext
    Decrypt,
    /// Re-encrypt under a new passphrase
    ChangePassphrase,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Resolved global options, passed explicitly to every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub config_path: PathBuf,
    pub max_passphrase_attempts: Option<u32>,
    pub sts_timeout: Duration,
    pub write_credentials_file: bool,
}

impl Settings {
    /// Resolve defaults for anything not given on the command line.
    ///
    /// # Errors
    ///
    /// Fails if no config path was given and the home directory is unknown.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config_path = match &cli.config {
            Some(path) => path.clone(),
            None => ConfigStore::default_path()?,
        };
        Ok(Self {
            config_path,
            max_passphrase_attempts: cli.max_passphrase_attempts,
            sts_timeout: Duration::from_secs(cli.sts_timeout),
            write_credentials_file: cli.write_credentials_file,
        })
    }

    pub fn store(&self) -> ConfigStore {
        ConfigStore::new(&self.config_path)
    }

    pub fn retry_gate(&self) -> RetryGate {
        RetryGate::from_limit(self.max_passphrase_attempts)
    }
}

/// Load the configuration, prompting for the passphrase if it is encrypted.
pub(crate) fn open_vault(settings: &Settings, prompter: &mut dyn Prompter) -> Result<Vault> {
    Vault::open(
        settings.store(),
        &settings.retry_gate(),
        &mut Prompted(prompter),
    )
}

/// Execute a command.
pub fn execute(command: Command, settings: &Settings) -> Result<()> {
    use Command::*;

    match command {
        Init => init::execute(settings),
        Login => login::execute(settings),
        Crypto { action } => crypto::execute(action, settings),
        Sessions { json } => sessions::execute(json, settings),
        Completions { shell } => completions::execute(shell),
    }
}
