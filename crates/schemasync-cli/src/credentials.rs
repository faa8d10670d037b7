use std::io::IsTerminal;

use anyhow::{Context, Result};
use dialoguer::Password;
use tracing::warn;

/// Source of secrets that were not supplied on the command line.
pub trait CredentialProvider {
    /// Obtain the secret described by `label`. `None` means "no password";
    /// the diff tool then falls back to `PGPASSWORD` or `.pgpass`.
    fn secret(&self, label: &str) -> Result<Option<String>>;
}

/// Asks on the terminal without echoing input.
pub struct TerminalPrompt;

impl CredentialProvider for TerminalPrompt {
    fn secret(&self, label: &str) -> Result<Option<String>> {
        if !std::io::stdin().is_terminal() {
            warn!("stdin is not a terminal, skipping prompt: {label}");
            return Ok(None);
        }

        let secret: String = Password::new()
            .with_prompt(label)
            .allow_empty_password(true)
            .interact()
            .context("password input cancelled")?;

        Ok(Some(secret).filter(|s| !s.is_empty()))
    }
}

pub fn dev_password_label(user: &str) -> String {
    format!("Development database password for {user}")
}

pub fn prod_password_label(user: &str) -> String {
    format!("Production database password for {user}")
}
