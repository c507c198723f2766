// ABOUTME: Library side of the otpssh binary
// ABOUTME: Orchestrates login, server selection, OTP issuance and the session bridge

use anyhow::{Context, Result};
use otpssh_core::{Config, OperatorCredentials, SessionMode, Target};
use otpssh_session::{ExecBridge, SessionBridge, SessionOutcome, SshBridge};
use otpssh_vault::{VaultClient, VaultError};
use std::io;
use tracing::{error, info};

pub mod cli;
pub mod prompt;
pub mod select;

use cli::{Cli, Command, SshArgs};
use select::SelectionError;

/// Runs the parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(address) = cli.vault_address {
        config.vault_address = address;
    }
    config.validate().context("Invalid configuration")?;

    match cli.command.unwrap_or(Command::Ssh(cli.ssh)) {
        Command::List => {
            select::render_table(&config.servers, &mut io::stdout().lock())?;
            Ok(())
        }
        Command::Ssh(args) => ssh(&config, args).await,
    }
}

async fn ssh(config: &Config, args: SshArgs) -> Result<()> {
    let mode = args.mode.map(SessionMode::from).unwrap_or(config.mode);
    let bridge: Box<dyn SessionBridge> = match mode {
        SessionMode::Bridge => Box::new(SshBridge::new()),
        SessionMode::Exec => Box::new(ExecBridge::new(&config.ssh_binary)?),
    };

    let vault = VaultClient::new(config.vault_base_url())?;
    let credentials = prompt::credentials(args.username)?;

    let choose = || -> std::result::Result<Target, SelectionError> {
        match args.server.as_deref() {
            Some(name) => select::by_name(&config.servers, name).cloned(),
            None => select::select_target(
                &config.servers,
                &mut io::stdin().lock(),
                &mut io::stdout().lock(),
            )
            .cloned(),
        }
    };

    run_flow(&vault, credentials, choose, bridge.as_ref()).await?;
    Ok(())
}

/// The three stages in order: login, choose a target, issue its OTP, open
/// the session.
///
/// Each stage's output is handed to the next by value; nothing is shared
/// or cached beyond this call.
pub async fn run_flow<F>(
    vault: &VaultClient,
    credentials: OperatorCredentials,
    choose: F,
    bridge: &dyn SessionBridge,
) -> Result<SessionOutcome>
where
    F: FnOnce() -> std::result::Result<Target, SelectionError>,
{
    let token = vault.login(credentials).await?;

    let target = choose()?;
    info!("You selected {}", target.name);

    let credential = vault.issue_otp(&token, &target).await?;
    drop(token);

    let outcome = bridge
        .open(&target, credential)
        .await
        .with_context(|| format!("Session to {} failed", target.name))?;
    Ok(outcome)
}

/// Line shown on stdout for failures the operator caused or the broker
/// refused; `None` for failures that are only logged.
pub fn user_message(err: &anyhow::Error) -> Option<String> {
    if let Some(VaultError::Rejected { message, .. }) = err.downcast_ref::<VaultError>() {
        return Some(format!("Error: {message}"));
    }
    match err.downcast_ref::<SelectionError>() {
        Some(e @ (SelectionError::Exhausted(_) | SelectionError::UnknownServer(_))) => {
            Some(e.to_string())
        }
        _ => None,
    }
}

/// Reports a fatal error the way the operator expects to see it.
pub fn report(err: &anyhow::Error) {
    match user_message(err) {
        Some(line) => println!("{line}"),
        None => error!("{:#}", err),
    }
}
