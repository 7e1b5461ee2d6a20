//! Crypto command - encrypt, decrypt or re-key the configuration.

use tracing::info;

use crate::cli::prompt::TerminalPrompter;
use crate::cli::{open_vault, output, CryptoAction, Settings};
use crate::core::prompt::Prompter;
use crate::core::vault::Vault;
use crate::error::{Result, ValidationError};

/// Run `action`, or offer a menu of what applies when none is given.
pub fn execute(action: Option<CryptoAction>, settings: &Settings) -> Result<()> {
    let mut prompter = TerminalPrompter::new();
    let mut vault = open_vault(settings, &mut prompter)?;

    let action = match action {
        Some(action) => action,
        None => choose(&vault, &mut prompter)?,
    };
    info!(?action, encrypted = vault.is_encrypted(), "running crypto action");

    apply(&mut vault, action, &mut prompter)?;
    let message = match action {
        CryptoAction::Encrypt => "configuration encrypted",
        CryptoAction::Decrypt => "configuration decrypted",
        CryptoAction::ChangePassphrase => "passphrase changed",
    };
    output::success(message);
    Ok(())
}

fn choose(vault: &Vault, prompter: &mut dyn Prompter) -> Result<CryptoAction> {
    let actions: &[(CryptoAction, &str)] = if vault.is_encrypted() {
        &[
            (CryptoAction::Decrypt, "Decrypt configuration"),
            (CryptoAction::ChangePassphrase, "Change passphrase"),
        ]
    } else {
        &[(CryptoAction::Encrypt, "Encrypt configuration")]
    };
    let labels: Vec<String> = actions.iter().map(|(_, l)| l.to_string()).collect();
    let idx = prompter.select("What would you like to do?", &labels)?;
    Ok(actions[idx].0)
}

/// Apply one action to an opened vault.
///
/// # Errors
///
/// Returns `AlreadyEncrypted`/`NotEncrypted` when the action does not fit the
/// current state, before asking for a new passphrase.
pub fn apply(vault: &mut Vault, action: CryptoAction, prompter: &mut dyn Prompter) -> Result<()> {
    match action {
        CryptoAction::Encrypt => {
            if vault.is_encrypted() {
                return Err(ValidationError::AlreadyEncrypted.into());
            }
            let passphrase = prompter.new_passphrase()?;
            vault.encrypt(passphrase)
        }
        CryptoAction::Decrypt => vault.decrypt(),
        CryptoAction::ChangePassphrase => {
            if !vault.is_encrypted() {
                return Err(ValidationError::NotEncrypted.into());
            }
            let passphrase = prompter.new_passphrase()?;
            vault.rotate_passphrase(passphrase)
        }
    }
}
