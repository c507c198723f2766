// ABOUTME: Exec-mode session bridge that hands the terminal to the system ssh client.
// ABOUTME: The OTP reaches ssh through the askpass protocol, never through argv.

use async_trait::async_trait;
use otpssh_core::{OtpSecret, Target};
use otpssh_vault::OneTimeCredential;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;
use tracing::info;

use crate::bridge::{SessionBridge, SessionOutcome};
use crate::error::{Result, SessionError};

/// Environment variable carrying the OTP from otpssh to its askpass child.
pub const ASKPASS_SECRET_ENV: &str = "OTPSSH_ASKPASS_SECRET";

/// If this process was started by ssh as its askpass helper, returns the
/// answer to print.
pub fn askpass_response() -> Option<String> {
    askpass_answer(std::env::var(ASKPASS_SECRET_ENV).ok())
}

/// An unset or empty variable means we were not started as askpass.
fn askpass_answer(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Replaces the current process with `ssh`.
#[derive(Debug, Clone)]
pub struct ExecBridge {
    ssh_binary: String,
    askpass_program: PathBuf,
}

impl ExecBridge {
    /// Uses the running executable as the askpass helper.
    pub fn new(ssh_binary: impl Into<String>) -> Result<Self> {
        let askpass_program = std::env::current_exe().map_err(|source| SessionError::Exec {
            program: "current executable".to_string(),
            source,
        })?;
        Ok(Self::with_askpass(ssh_binary, askpass_program))
    }

    pub fn with_askpass(ssh_binary: impl Into<String>, askpass_program: PathBuf) -> Self {
        Self {
            ssh_binary: ssh_binary.into(),
            askpass_program,
        }
    }

    /// Builds the ssh invocation for `target`.
    pub fn command(&self, target: &Target, secret: &OtpSecret) -> Command {
        let mut cmd = Command::new(&self.ssh_binary);
        cmd.args(ssh_args(target))
            .env("SSH_ASKPASS", &self.askpass_program)
            .env("SSH_ASKPASS_REQUIRE", "force")
            .env(ASKPASS_SECRET_ENV, secret.expose());
        cmd
    }
}

fn ssh_args(target: &Target) -> Vec<OsString> {
    vec![
        "-p".into(),
        target.port.to_string().into(),
        "-o".into(),
        "PreferredAuthentications=keyboard-interactive,password".into(),
        "-o".into(),
        "StrictHostKeyChecking=accept-new".into(),
        target.ssh_destination().into(),
    ]
}

#[async_trait]
impl SessionBridge for ExecBridge {
    async fn open(
        &self,
        target: &Target,
        credential: OneTimeCredential,
    ) -> Result<SessionOutcome> {
        let secret = credential.into_secret();
        let mut cmd = self.command(target, &secret);
        drop(secret);

        info!("Handing over to {} for {}", self.ssh_binary, target.name);
        run(&mut cmd, &self.ssh_binary)
    }
}

#[cfg(unix)]
fn run(cmd: &mut Command, program: &str) -> Result<SessionOutcome> {
    use std::os::unix::process::CommandExt;

    // exec only returns on failure.
    let source = cmd.exec();
    Err(SessionError::Exec {
        program: program.to_string(),
        source,
    })
}

#[cfg(not(unix))]
fn run(cmd: &mut Command, program: &str) -> Result<SessionOutcome> {
    let status = cmd.status().map_err(|source| SessionError::Exec {
        program: program.to_string(),
        source,
    })?;
    Ok(SessionOutcome {
        exit_status: status.code().map(|c| c as u32),
    })
}
