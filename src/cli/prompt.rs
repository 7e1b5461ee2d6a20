//! Terminal [`Prompter`].
//!
//! On a TTY prompts are rendered with dialoguer. When stdin is piped, text
//! and passphrases are read one line at a time so the binary can be driven
//! from scripts; selections still need a terminal.

use std::io::{self, BufRead, IsTerminal};

use dialoguer::{Input, Password, Select};

use crate::cli::output;
use crate::core::prompt::Prompter;
use crate::core::types::Passphrase;
use crate::error::{Error, Result, UnlockError, ValidationError};

/// Prompter backed by the controlling terminal.
#[derive(Debug)]
pub struct TerminalPrompter {
    interactive: bool,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }

    /// Next line from piped stdin. End of input counts as cancellation.
    fn read_line(&self) -> Result<String> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(UnlockError::UserCancelled.into());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Ctrl-C inside a dialoguer prompt surfaces as an interrupted read.
fn interrupted(e: dialoguer::Error) -> Error {
    match e {
        dialoguer::Error::IO(ref err) if err.kind() == io::ErrorKind::Interrupted => {
            UnlockError::UserCancelled.into()
        }
        e => e.into(),
    }
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, message: &str, items: &[String]) -> Result<usize> {
        if !self.interactive {
            return Err(ValidationError::NotInteractive("selection").into());
        }
        Select::new()
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact_opt()
            .map_err(interrupted)?
            .ok_or_else(|| UnlockError::UserCancelled.into())
    }

    fn text(&mut self, message: &str) -> Result<String> {
        if !self.interactive {
            return self.read_line();
        }
        Input::<String>::new()
            .with_prompt(message)
            .interact_text()
            .map_err(interrupted)
    }

    fn number(&mut self, message: &str, default: u32, min: u32, max: u32) -> Result<u32> {
        if !self.interactive {
            let line = self.read_line()?;
            let line = line.trim();
            if line.is_empty() {
                return Ok(default);
            }
            return line
                .parse()
                .map_err(|_| ValidationError::InvalidNumber(line.to_string()).into());
        }
        Input::<u32>::new()
            .with_prompt(message)
            .default(default)
            .validate_with(move |n: &u32| -> std::result::Result<(), String> {
                if (min..=max).contains(n) {
                    Ok(())
                } else {
                    Err(format!("enter a value between {} and {}", min, max))
                }
            })
            .interact_text()
            .map_err(interrupted)
    }

    fn passphrase(&mut self, message: &str) -> Result<Passphrase> {
        let value = if self.interactive {
            Password::new()
                .with_prompt(message)
                .interact()
                .map_err(interrupted)?
        } else {
            self.read_line()?
        };
        Ok(Passphrase::new(value))
    }

    fn new_passphrase(&mut self) -> Result<Passphrase> {
        let value = if self.interactive {
            Passphrase::new(
                Password::new()
                    .with_prompt("New passphrase")
                    .with_confirmation("Confirm passphrase", "passphrases do not match")
                    .interact()
                    .map_err(interrupted)?,
            )
        } else {
            let first = Passphrase::new(self.read_line()?);
            let second = Passphrase::new(self.read_line()?);
            if first != second {
                return Err(UnlockError::Mismatch.into());
            }
            first
        };
        if value.is_empty() {
            return Err(UnlockError::EmptyPassphrase.into());
        }
        Ok(value)
    }

    fn warn(&mut self, message: &str) {
        output::warn(message);
    }
}
