// ABOUTME: Target descriptor for a host reachable through a broker OTP role.
// ABOUTME: Loaded from the [[servers]] tables of the config file.

use serde::{Deserialize, Serialize};

/// Default SSH port used when a server entry omits `port`.
pub const DEFAULT_SSH_PORT: u16 = 22;

fn default_port() -> u16 {
    DEFAULT_SSH_PORT
}

/// A host the operator can log into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Display name shown in the selection table.
    pub name: String,

    /// Network address; also the `ip` the OTP is scoped to.
    pub ip: String,

    /// Login user on the target host.
    pub login_username: String,

    /// Broker-side SSH role used to issue the OTP.
    pub vault_role: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Target {
    /// Returns `host:port`, bracketing IPv6 literals.
    pub fn socket_addr(&self) -> String {
        if self.ip.contains(':') && !self.ip.starts_with('[') {
            format!("[{}]:{}", self.ip, self.port)
        } else {
            format!("{}:{}", self.ip, self.port)
        }
    }

    /// Returns `user@host` as the external ssh client expects it.
    pub fn ssh_destination(&self) -> String {
        format!("{}@{}", self.login_username, self.ip)
    }
}
