// ABOUTME: Vault HTTP client for userpass login and SSH OTP issuance.
// ABOUTME: Maps broker responses onto SessionToken and OneTimeCredential values.

use otpssh_core::{OperatorCredentials, OtpSecret, SessionToken, Target};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info};
use url::Url;

use crate::credential::OneTimeCredential;
use crate::error::{Result, Stage, VaultError};
use crate::wire::{ErrorResponse, LoginRequest, LoginResponse, OtpRequest, OtpResponse};

/// Header carrying the broker session token.
pub const VAULT_TOKEN_HEADER: &str = "X-Vault-Token";

/// Client for one broker, reused for both calls of a run.
///
/// No request timeout is configured: a hung broker blocks until the
/// operator interrupts the process.
pub struct VaultClient {
    http: Client,
    base_url: Url,
}

impl VaultClient {
    /// Creates a client for the broker at `address` (e.g. `https://vault:8200`).
    pub fn new(address: &str) -> Result<Self> {
        let invalid = |reason: String| VaultError::InvalidAddress {
            address: address.to_string(),
            reason,
        };

        let base_url = Url::parse(address.trim()).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("not a base URL".to_string()));
        }

        let http = Client::builder().build().map_err(VaultError::ClientBuild)?;

        Ok(Self { http, base_url })
    }

    /// Exchanges operator credentials for a broker session token.
    ///
    /// The credentials are consumed; the password is wiped as soon as the
    /// request body has been built.
    pub async fn login(&self, credentials: OperatorCredentials) -> Result<SessionToken> {
        let url = self.endpoint(&["v1", "auth", "userpass", "login", &credentials.username])?;

        info!("Logging into Vault...");
        let request = self.http.post(url).json(&LoginRequest {
            password: credentials.password(),
        });
        drop(credentials);

        let resp = request.send().await.map_err(|source| VaultError::Transport {
            stage: Stage::Login,
            source,
        })?;
        let body = read_success(Stage::Login, resp).await?;

        let parsed: LoginResponse =
            serde_json::from_slice(&body).map_err(|source| VaultError::Malformed {
                stage: Stage::Login,
                source,
            })?;
        let auth = parsed.auth.ok_or(VaultError::EmptyToken)?;
        if auth.client_token.is_empty() {
            return Err(VaultError::EmptyToken);
        }

        info!(lease_duration = auth.lease_duration, "Logged into Vault");
        debug!(policies = ?auth.policies, "Vault token policies");

        Ok(SessionToken::new(auth.client_token))
    }

    /// Requests a fresh OTP for `target`, scoped by its ip and role.
    pub async fn issue_otp(
        &self,
        token: &SessionToken,
        target: &Target,
    ) -> Result<OneTimeCredential> {
        let url = self.endpoint(&["v1", "ssh", "creds", &target.vault_role])?;

        info!(server = %target.name, role = %target.vault_role, "Generating OTP from Vault...");
        let resp = self
            .http
            .post(url)
            .header(VAULT_TOKEN_HEADER, token.expose())
            .json(&OtpRequest { ip: &target.ip })
            .send()
            .await
            .map_err(|source| VaultError::Transport {
                stage: Stage::Issue,
                source,
            })?;
        let body = read_success(Stage::Issue, resp).await?;

        let parsed: OtpResponse =
            serde_json::from_slice(&body).map_err(|source| VaultError::Malformed {
                stage: Stage::Issue,
                source,
            })?;
        let data = parsed.data.ok_or(VaultError::MissingSecret)?;
        if data.key.is_empty() {
            return Err(VaultError::MissingSecret);
        }

        let ip = if data.ip.is_empty() {
            target.ip.clone()
        } else {
            data.ip
        };
        let username = if data.username.is_empty() {
            target.login_username.clone()
        } else {
            data.username
        };

        let mut credential = OneTimeCredential::new(OtpSecret::new(data.key), ip, username);
        credential.port = data.port;
        credential.key_type = data.key_type;
        credential.lease_id = Some(parsed.lease_id).filter(|id| !id.is_empty());
        credential.lease_duration = Some(parsed.lease_duration).filter(|d| *d > 0);

        info!(
            server = %target.name,
            username = %credential.username,
            lease_duration = ?credential.lease_duration,
            "Generated OTP"
        );

        Ok(credential)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| VaultError::InvalidAddress {
                address: self.base_url.to_string(),
                reason: "not a base URL".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Reads the body of a 200 response, or turns anything else into a rejection.
async fn read_success(stage: Stage, resp: Response) -> Result<Vec<u8>> {
    let status = resp.status();
    let body = resp
        .bytes()
        .await
        .map_err(|source| VaultError::Transport { stage, source })?;

    if status != StatusCode::OK {
        return Err(rejection(stage, status, &body));
    }
    Ok(body.to_vec())
}

fn rejection(stage: Stage, status: StatusCode, body: &[u8]) -> VaultError {
    let parsed: ErrorResponse = serde_json::from_slice(body).unwrap_or_default();
    let message = parsed
        .errors
        .into_iter()
        .next()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| match status.canonical_reason() {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => format!("HTTP {}", status.as_u16()),
        });

    debug!(%stage, status = status.as_u16(), "broker rejected request");

    VaultError::Rejected {
        stage,
        status: status.as_u16(),
        message,
    }
}
