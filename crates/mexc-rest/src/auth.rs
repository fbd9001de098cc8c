//! Credentials and HMAC-SHA256 request signing
//!
//! Private endpoints require every request to carry a `signature` parameter:
//! the lowercase hex HMAC-SHA256 of the url-encoded parameter string, keyed
//! with the account secret. The secret itself is never transmitted.
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::error::{RestError, RestResult};

type HmacSha256 = Hmac<Sha256>;

/// API credentials for authenticated requests
///
/// Immutable for the lifetime of a client instance; the secret is zeroized
/// when the credentials are dropped.
#[derive(Clone)]
pub struct Credentials {
    /// API key (sent as a header, safe to log)
    api_key: String,
    /// API secret (used only as an HMAC key)
    api_secret: SecretString,
}

impl Credentials {
    /// Create credentials from explicit values
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Create credentials from environment variables
    ///
    /// Reads `MEXC_API_KEY` and `MEXC_API_SECRET` from the environment.
    pub fn from_env() -> RestResult<Self> {
        let api_key = std::env::var("MEXC_API_KEY")
            .map_err(|_| RestError::EnvVarNotSet("MEXC_API_KEY".to_string()))?;
        let api_secret = std::env::var("MEXC_API_SECRET")
            .map_err(|_| RestError::EnvVarNotSet("MEXC_API_SECRET".to_string()))?;

        Ok(Self::new(api_key, api_secret))
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Expose the secret for signing. Never log the return value.
    fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field(
                "api_key",
                &format!("{}...", &self.api_key[..8.min(self.api_key.len())]),
            )
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Request signer for building authenticated requests
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer with the given credentials
    pub fn new(credentials: &'a Credentials) -> Self {
        Self { credentials }
    }

    /// Sign a message and return the hex-encoded signature
    ///
    /// Computes HMAC-SHA256 of the message bytes using the account secret
    /// and returns the result as a lowercase hex string. Deterministic:
    /// identical inputs always yield identical output.
    pub fn sign(&self, message: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.credentials.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");

        mac.update(message.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Serialize parameters and append the signature
    ///
    /// The parameter list is url-form-encoded in its given left-to-right
    /// order; that exact string is signed, and `signature` is appended as
    /// the final pair. The returned string is transmitted as-is, so the
    /// bytes that were signed and the bytes on the wire cannot diverge.
    pub fn signed_query(&self, params: &[(&str, String)]) -> RestResult<String> {
        let query = serde_urlencoded::to_string(params)
            .map_err(|e| RestError::InvalidParameter(e.to_string()))?;
        let signature = self.sign(&query);
        Ok(format!("{}&signature={}", query, signature))
    }
}
