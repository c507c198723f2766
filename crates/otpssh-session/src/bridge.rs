// ABOUTME: SessionBridge trait shared by the in-process and exec session modes.
// ABOUTME: The orchestrator hands a target and its one-time credential to a bridge.

use async_trait::async_trait;
use otpssh_core::Target;
use otpssh_vault::OneTimeCredential;

use crate::error::Result;

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionOutcome {
    /// Exit status reported by the remote shell, if any.
    pub exit_status: Option<u32>,
}

/// Opens an interactive shell on `target` using a one-time credential.
///
/// The credential is taken by value and must not outlive the call.
#[async_trait]
pub trait SessionBridge: Send + Sync {
    async fn open(&self, target: &Target, credential: OneTimeCredential)
        -> Result<SessionOutcome>;
}
