// ABOUTME: CLI definitions using clap
// ABOUTME: Global config/broker flags plus the ssh and list subcommands

use clap::{Args, Parser, Subcommand, ValueEnum};
use otpssh_core::SessionMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "otpssh", about = "Log into servers with Vault SSH one-time passwords")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// `ssh` options accepted without naming the subcommand
    #[command(flatten)]
    pub ssh: SshArgs,

    /// Config file (defaults to ~/.config/otpssh/config.toml)
    #[arg(long, short, global = true, env = "OTPSSH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Vault address, overriding the config file (e.g., https://vault:8200)
    #[arg(long, global = true, env = "VAULT_ADDR")]
    pub vault_address: Option<String>,

    /// Debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log into a server with a Vault OTP (default)
    Ssh(SshArgs),

    /// List configured servers
    List,
}

#[derive(Args, Debug)]
pub struct SshArgs {
    /// Server name to log into, skipping the selection prompt
    #[arg(long, short)]
    pub server: Option<String>,

    /// How to open the session (defaults to the config file's mode)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Vault user name (prompted for when absent)
    #[arg(long, short, env = "VAULT_USERNAME")]
    pub username: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// In-process SSH with a relayed pty
    Bridge,
    /// Replace this process with the system ssh client
    Exec,
}

impl From<ModeArg> for SessionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Bridge => SessionMode::Bridge,
            ModeArg::Exec => SessionMode::Exec,
        }
    }
}
