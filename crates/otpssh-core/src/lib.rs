// ABOUTME: Core types shared by every otpssh crate
// ABOUTME: Re-exports config, target descriptors and secret wrappers

pub mod config;
pub mod error;
pub mod secret;
pub mod target;

pub use config::{Config, SessionMode};
pub use error::{ConfigError, Result};
pub use secret::{OperatorCredentials, OtpSecret, SessionToken};
pub use target::Target;
