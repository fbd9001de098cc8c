//! Error types for REST API operations

use mexc_types::MexcApiError;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP request failed (connection, TLS, timeout); propagated raw
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The exchange returned an error body
    #[error("API error (HTTP {status}): {error}")]
    Api {
        /// Parsed `{"code","msg"}` body
        error: MexcApiError,
        /// HTTP status of the response
        status: u16,
    },

    /// Non-success status with a body that is not an exchange error object
    #[error("HTTP status {status}: {body}")]
    Http {
        /// HTTP status of the response
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_ms}ms")]
    RateLimited {
        /// Milliseconds to wait before retrying
        retry_after_ms: u64,
    },

    /// Missing API credentials for a private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Invalid request parameters, rejected before any network call
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Asset not present in the account balances
    #[error("Asset not found in account balances: {asset}")]
    AssetNotFound {
        /// The asset code that was looked up
        asset: String,
    },

    /// Failed to parse a response body
    #[error("Parse error: {0}")]
    Parse(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),
}

impl RestError {
    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
            || matches!(self, Self::Api { error, .. } if error.is_rate_limit())
    }

    /// Check if this error is an authentication or signing failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::AuthRequired)
            || matches!(self, Self::Api { error, .. } if error.is_auth_error())
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
