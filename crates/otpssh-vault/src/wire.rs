// ABOUTME: JSON payloads exchanged with the Vault HTTP API.
// ABOUTME: Only the fields otpssh actually reads are modeled.

use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub password: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct LoginResponse {
    pub auth: Option<LoginAuth>,
}

#[derive(Deserialize)]
pub(crate) struct LoginAuth {
    #[serde(default)]
    pub client_token: String,
    #[serde(default)]
    pub policies: Vec<String>,
    #[serde(default)]
    pub lease_duration: u64,
}

#[derive(Serialize)]
pub(crate) struct OtpRequest<'a> {
    pub ip: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct OtpResponse {
    #[serde(default)]
    pub lease_id: String,
    #[serde(default)]
    pub lease_duration: u64,
    pub data: Option<OtpData>,
}

#[derive(Deserialize)]
pub(crate) struct OtpData {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub key_type: Option<String>,
}

/// Vault emits `errors`; older proxies capitalize it.
#[derive(Deserialize, Default)]
pub(crate) struct ErrorResponse {
    #[serde(default, alias = "Errors")]
    pub errors: Vec<String>,
}
