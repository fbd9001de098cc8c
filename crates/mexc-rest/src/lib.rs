//! REST API client for the MEXC spot cryptocurrency exchange
//!
//! This crate provides a client for MEXC's spot REST API: market data,
//! order placement (live and test), order cancellation, and account
//! balances.
//!
//! # Features
//!
//! - **Market Data**: connectivity check, server time, exchange info,
//!   order book, recent/historical trades, klines, average price
//! - **Trading**: place and cancel orders, bulk open-order cancellation
//! - **Account**: balances, per-asset balance lookup
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Each signed request carries
//! the API key in the `X-MEXC-APIKEY` header and a trailing `signature`
//! parameter: the hex HMAC-SHA256 of the url-encoded parameter string,
//! keyed with the account secret.
//!
//! # Example
//!
//! ```no_run
//! use mexc_rest::{Credentials, MexcRestClient, OrderRequest, OrderSide};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = MexcRestClient::new()?;
//!     let time = client.server_time().await?;
//!     println!("server time: {}", time.server_time);
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = MexcRestClient::with_credentials(creds)?;
//!     let order = OrderRequest::limit("BTCUSDT", OrderSide::Buy, "0.001", "30000");
//!     let echo = auth_client.place_order_test(&order, 1700000000).await?;
//!     println!("validated: {}", echo);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Failure semantics
//!
//! No retries and no recovery policy: transport failures propagate raw,
//! and exchange-reported errors surface as [`RestError::Api`] carrying
//! the `{"code","msg"}` body the server returned.

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod transport;
pub mod types;

// Re-export main types
pub use auth::{Credentials, RequestSigner};
pub use client::{ClientConfig, MexcRestClient};
pub use error::{RestError, RestResult};
pub use transport::{HttpMethod, HttpRequest, HttpTransport, Transport, API_KEY_HEADER};

// Re-export endpoint-specific types
pub use types::{
    // Market data
    AveragePrice, ExchangeInfo, Kline, OrderBook, ServerTime, SymbolInfo, Trade,
    // Trading
    CancelAck, OrderAck, OrderRequest,
    // Account
    AccountInfo, Balance,
};

// Re-export the shared enums and error codes
pub use mexc_types::{ErrorCategory, KlineInterval, MexcApiError, OrderSide, OrderType};
