// ABOUTME: In-memory secret wrappers for operator passwords, broker tokens and OTPs.
// ABOUTME: Every wrapper zeroizes on drop and redacts itself in Debug output.

use std::fmt;
use zeroize::Zeroizing;

const REDACTED: &str = "<redacted>";

/// Username and password typed by the operator.
///
/// The password is wiped from memory when this value is dropped, which
/// happens right after the login request is sent.
pub struct OperatorCredentials {
    /// Broker username.
    pub username: String,
    password: Zeroizing<String>,
}

impl OperatorCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for OperatorCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorCredentials")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Opaque broker session token, valid for the rest of the run.
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    /// Returns the raw token for placing in a request header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken({REDACTED})")
    }
}

/// One-time SSH password issued by the broker for a single target.
///
/// Deliberately neither `Clone` nor `Display`: it is moved into the session
/// bridge and answered to the server, nothing else.
pub struct OtpSecret(Zeroizing<String>);

impl OtpSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    /// Returns the raw secret for answering an authentication prompt.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for OtpSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OtpSecret({REDACTED})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_credentials_debug_redacts_password() {
        let creds = OperatorCredentials::new("alice", "hunter2");
        let debug = format!("{:?}", creds);

        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains(REDACTED));
        assert_eq!(creds.password(), "hunter2");
    }

    #[test]
    fn test_session_token_debug_redacts() {
        let token = SessionToken::new("tok-abc");

        assert_eq!(format!("{:?}", token), "SessionToken(<redacted>)");
        assert_eq!(token.expose(), "tok-abc");
        assert!(!token.is_empty());
    }

    #[test]
    fn test_otp_secret_debug_redacts() {
        let secret = OtpSecret::new("otp123");

        assert_eq!(format!("{:?}", secret), "OtpSecret(<redacted>)");
        assert_eq!(secret.expose(), "otp123");
    }

    #[test]
    fn test_empty_values() {
        assert!(SessionToken::new("").is_empty());
        assert!(OtpSecret::new(String::new()).is_empty());
    }
}
