// ABOUTME: One-time SSH credential issued by the broker for a single target.
// ABOUTME: Owns the OTP secret; handed by value to the session bridge.

use otpssh_core::OtpSecret;

/// A broker-issued OTP plus the metadata Vault returned with it.
///
/// Not `Clone`: the credential is consumed exactly once by the session
/// bridge. `Debug` output never contains the secret.
#[derive(Debug)]
pub struct OneTimeCredential {
    /// Address the OTP is scoped to.
    pub ip: String,
    /// Login user the OTP was issued for.
    pub username: String,
    pub port: Option<u16>,
    pub key_type: Option<String>,
    pub lease_id: Option<String>,
    /// Lease length in seconds, when the broker reports one.
    pub lease_duration: Option<u64>,
    secret: OtpSecret,
}

impl OneTimeCredential {
    pub fn new(secret: OtpSecret, ip: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            username: username.into(),
            port: None,
            key_type: None,
            lease_id: None,
            lease_duration: None,
            secret,
        }
    }

    pub fn secret(&self) -> &OtpSecret {
        &self.secret
    }

    /// Consumes the credential, keeping only the secret.
    pub fn into_secret(self) -> OtpSecret {
        self.secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_never_shows_secret() {
        let mut cred = OneTimeCredential::new(OtpSecret::new("otp123"), "10.0.0.5", "deploy");
        cred.lease_id = Some("ssh/creds/otp_key_role/abc".to_string());
        let debug = format!("{:?}", cred);

        assert!(debug.contains("10.0.0.5"));
        assert!(debug.contains("deploy"));
        assert!(!debug.contains("otp123"));
    }

    #[test]
    fn test_into_secret() {
        let cred = OneTimeCredential::new(OtpSecret::new("otp123"), "10.0.0.5", "deploy");
        assert_eq!(cred.secret().expose(), "otp123");
        assert_eq!(cred.into_secret().expose(), "otp123");
    }
}
