//! MEXC API error-code mapping
//!
//! The exchange reports failures as a JSON body `{"code": <i32>, "msg": <string>}`
//! alongside a non-2xx HTTP status. This module keeps the raw code and message
//! and classifies known codes so callers can branch without string matching.

/// Coarse classification of exchange error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Authentication and signing problems (bad key, bad signature, stale timestamp)
    Auth,
    /// Malformed or unsupported request parameters
    Request,
    /// Order placement/cancellation rejections
    Trade,
    /// Account state problems (insufficient balance, trading disabled)
    Account,
    /// Request rate exceeded
    RateLimit,
    /// Code not recognized
    Unknown,
}

/// Signature verification failed
pub const CODE_INVALID_SIGNATURE: i32 = 700002;
/// Request timestamp outside the receive window
pub const CODE_TIMESTAMP_OUT_OF_WINDOW: i32 = 700003;

/// An error reported by the exchange
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("code {code}: {message}")]
pub struct MexcApiError {
    /// Raw error code from the response body
    pub code: i32,
    /// Human-readable message from the response body
    pub message: String,
}

impl MexcApiError {
    /// Create an error from the code and message fields of an error body
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Classify the error code
    pub fn category(&self) -> ErrorCategory {
        match self.code {
            CODE_INVALID_SIGNATURE | CODE_TIMESTAMP_OUT_OF_WINDOW => ErrorCategory::Auth,
            // API key missing, malformed, or lacking permission
            700001 | 700006 | 700007 | 10072 => ErrorCategory::Auth,
            429 | 510 => ErrorCategory::RateLimit,
            // Insufficient balance / position
            30004 | 30005 => ErrorCategory::Account,
            c if (30000..31000).contains(&c) => ErrorCategory::Trade,
            c if (10000..11000).contains(&c) => ErrorCategory::Request,
            c if (700000..701000).contains(&c) => ErrorCategory::Request,
            _ => ErrorCategory::Unknown,
        }
    }

    /// Returns true for authentication and signing failures
    pub fn is_auth_error(&self) -> bool {
        self.category() == ErrorCategory::Auth
    }

    /// Returns true when the exchange rejected the request signature
    pub fn is_signature_error(&self) -> bool {
        self.code == CODE_INVALID_SIGNATURE
    }

    /// Returns true when the request was rate limited
    pub fn is_rate_limit(&self) -> bool {
        self.category() == ErrorCategory::RateLimit
    }
}
