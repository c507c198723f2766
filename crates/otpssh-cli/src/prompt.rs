// ABOUTME: Interactive prompts for the operator's Vault credentials.
// ABOUTME: The password is read without echo and goes straight into a zeroizing wrapper.

use anyhow::{Context, Result};
use dialoguer::{Input, Password};
use otpssh_core::OperatorCredentials;

/// Asks for the username (unless given) and the password.
pub fn credentials(username: Option<String>) -> Result<OperatorCredentials> {
    let username = match username {
        Some(u) => u,
        None => Input::<String>::new()
            .with_prompt("Enter your Vault user name")
            .interact_text()
            .context("Failed to read user name")?,
    };

    let password = Password::new()
        .with_prompt("Enter your Vault password")
        .interact()
        .context("Failed to read password")?;

    Ok(OperatorCredentials::new(username, password))
}
