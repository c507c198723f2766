// ABOUTME: Configuration loading and validation for otpssh.
// ABOUTME: Reads ~/.config/otpssh/config.toml or an explicit path.

use crate::error::{ConfigError, Result};
use crate::target::Target;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// How the remote shell is reached once an OTP is in hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// Speak SSH in-process and relay the terminal.
    #[default]
    Bridge,
    /// Replace this process with the system ssh client.
    Exec,
}

fn default_ssh_binary() -> String {
    "ssh".to_string()
}

/// otpssh configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Broker base URL (e.g., "https://vault.example.com:8200")
    #[serde(default)]
    pub vault_address: String,

    #[serde(default)]
    pub mode: SessionMode,

    /// ssh client used in exec mode
    #[serde(default = "default_ssh_binary")]
    pub ssh_binary: String,

    /// Servers offered for selection, in display order
    #[serde(default)]
    pub servers: Vec<Target>,
}

impl Config {
    /// Returns the config directory path (~/.config/otpssh)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::NoPath)?;
        Ok(home.join(".config").join("otpssh"))
    }

    /// Returns the path to the default config file
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads the config from `path`, or from the default location.
    ///
    /// The result is parsed but not validated; call [`Config::validate`]
    /// after applying command-line overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Checks that the broker address and every server entry are usable.
    pub fn validate(&self) -> Result<()> {
        let address = self.vault_address.trim();
        if address.is_empty() {
            return Err(ConfigError::Invalid("vault_address is required".into()));
        }
        let parsed = url::Url::parse(address).map_err(|e| {
            ConfigError::Invalid(format!("vault_address {address:?} is not a URL: {e}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "vault_address must use http or https, got {}",
                parsed.scheme()
            )));
        }

        if self.ssh_binary.trim().is_empty() {
            return Err(ConfigError::Invalid("ssh_binary must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for (i, server) in self.servers.iter().enumerate() {
            let n = i + 1;
            if server.name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("servers[{n}].name is required")));
            }
            if server.ip.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "servers[{n}] ({}) has no ip",
                    server.name
                )));
            }
            if server.login_username.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "servers[{n}] ({}) has no login_username",
                    server.name
                )));
            }
            if server.vault_role.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "servers[{n}] ({}) has no vault_role",
                    server.name
                )));
            }
            if !seen.insert(server.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate server name {:?}",
                    server.name
                )));
            }
        }

        Ok(())
    }

    /// Broker base URL without a trailing slash.
    pub fn vault_base_url(&self) -> &str {
        self.vault_address.trim().trim_end_matches('/')
    }

    /// Looks up a server by its display name.
    pub fn server(&self, name: &str) -> Option<&Target> {
        self.servers.iter().find(|s| s.name == name)
    }
}
