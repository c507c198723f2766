// ABOUTME: Error types for broker requests using thiserror.
// ABOUTME: Separates broker rejections from transport and payload failures.

use std::fmt;
use thiserror::Error;

/// Which broker call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Login,
    Issue,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Login => f.write_str("login"),
            Stage::Issue => f.write_str("credential issuance"),
        }
    }
}

/// Errors that can occur while talking to the broker.
#[derive(Error, Debug)]
pub enum VaultError {
    /// The broker answered with a non-200 status.
    ///
    /// `message` is the first entry of the broker's `errors` list, verbatim.
    #[error("{message}")]
    Rejected {
        stage: Stage,
        status: u16,
        message: String,
    },

    /// The broker address could not be turned into a request URL.
    #[error("invalid broker address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    /// The HTTP client could not be constructed (TLS backend failure).
    #[error("failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The request never produced a response, or the body could not be read.
    #[error("broker {stage} request failed: {source}")]
    Transport {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    /// A 200 response whose body is not the expected JSON.
    #[error("malformed broker {stage} response: {source}")]
    Malformed {
        stage: Stage,
        #[source]
        source: serde_json::Error,
    },

    /// Login succeeded but carried no client token.
    #[error("broker login succeeded but returned an empty client token")]
    EmptyToken,

    /// Issuance succeeded but carried no OTP key.
    #[error("broker issued a credential without a key")]
    MissingSecret,
}

impl VaultError {
    /// True for a broker-side rejection of the request (as opposed to a
    /// transport or payload problem).
    pub fn is_rejection(&self) -> bool {
        matches!(self, VaultError::Rejected { .. })
    }
}

/// Result type alias using VaultError.
pub type Result<T> = std::result::Result<T, VaultError>;
