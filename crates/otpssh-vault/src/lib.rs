// ABOUTME: Vault HTTP client for otpssh
// ABOUTME: Userpass login yields a session token, which buys a target-scoped SSH OTP

pub mod client;
pub mod credential;
pub mod error;
mod wire;

pub use client::VaultClient;
pub use credential::OneTimeCredential;
pub use error::{Result, Stage, VaultError};
