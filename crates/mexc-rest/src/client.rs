//! Main REST client implementation

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::auth::Credentials;
use crate::endpoints::{AccountEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::{RestError, RestResult};
use crate::transport::{HttpTransport, Transport, DEFAULT_BASE_URL};
use crate::types::{
    AccountInfo, AveragePrice, Balance, CancelAck, ExchangeInfo, Kline, OrderAck, OrderBook,
    OrderRequest, ServerTime, Trade,
};
use mexc_types::KlineInterval;

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// MEXC spot REST API client
///
/// Provides access to both public and private endpoints. The client is
/// stateless apart from the immutable credentials: it is `Clone` and safe
/// to share across tasks.
///
/// # Example
///
/// ```no_run
/// use mexc_rest::{Credentials, MexcRestClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = MexcRestClient::new()?;
///     let book = client.order_book("BTCUSDT", None).await?;
///     println!("best bid: {:?}", book.best_bid());
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = MexcRestClient::with_credentials(creds)?;
///     let balances = auth_client.balances().await?;
///     println!("{} assets", balances.len());
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct MexcRestClient {
    transport: Arc<dyn Transport>,
    credentials: Option<Credentials>,
}

impl MexcRestClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let transport = HttpTransport::new(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            config.user_agent.as_deref(),
        )?;

        info!(base_url = %config.base_url, "Created MEXC REST client");

        Ok(Self {
            transport: Arc::new(transport),
            credentials: config.credentials,
        })
    }

    /// Create a client over an injected transport
    ///
    /// This is the seam used to exercise request building and signing
    /// without network I/O.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        credentials: Option<Credentials>,
    ) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self.transport.as_ref())
    }

    /// Check connectivity to the REST endpoint
    pub async fn ping(&self) -> RestResult<bool> {
        self.market().ping().await
    }

    /// Get server time
    pub async fn server_time(&self) -> RestResult<ServerTime> {
        self.market().server_time().await
    }

    /// Get exchange metadata: trading rules and instrument listing
    pub async fn exchange_info(&self) -> RestResult<ExchangeInfo> {
        self.market().exchange_info().await
    }

    /// Get the order book of a symbol (limit defaults to 100)
    pub async fn order_book(&self, symbol: &str, limit: Option<u32>) -> RestResult<OrderBook> {
        self.market().order_book(symbol, limit).await
    }

    /// Get the most recent trades of a symbol (limit defaults to 500)
    pub async fn recent_trades(&self, symbol: &str, limit: Option<u32>) -> RestResult<Vec<Trade>> {
        self.market().recent_trades(symbol, limit).await
    }

    /// Get older trades of a symbol (limit defaults to 500)
    pub async fn historical_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> RestResult<Vec<Trade>> {
        self.market().historical_trades(symbol, limit).await
    }

    /// Get the candlestick series of a symbol
    pub async fn klines(
        &self,
        symbol: &str,
        interval: KlineInterval,
        start_time: Option<u64>,
        end_time: Option<u64>,
        limit: Option<u32>,
    ) -> RestResult<Vec<Kline>> {
        self.market()
            .klines(symbol, interval, start_time, end_time, limit)
            .await
    }

    /// Get the current average price of a symbol
    pub async fn average_price(&self, symbol: &str) -> RestResult<AveragePrice> {
        self.market().average_price(symbol).await
    }

    // ========================================================================
    // Private Trading Endpoints
    // ========================================================================

    /// Get trading endpoints (requires credentials)
    pub fn trading(&self) -> RestResult<TradingEndpoints<'_>> {
        let creds = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(TradingEndpoints::new(self.transport.as_ref(), creds))
    }

    /// Validate an order without executing it
    pub async fn place_order_test(
        &self,
        order: &OrderRequest,
        timestamp: u64,
    ) -> RestResult<serde_json::Value> {
        self.trading()?.place_order_test(order, timestamp).await
    }

    /// Place a live order
    pub async fn place_order(&self, order: &OrderRequest, timestamp: u64) -> RestResult<OrderAck> {
        self.trading()?.place_order(order, timestamp).await
    }

    /// Cancel an order by exchange order id
    pub async fn cancel_order(
        &self,
        symbol: &str,
        order_id: &str,
        timestamp: u64,
    ) -> RestResult<CancelAck> {
        self.trading()?.cancel_order(symbol, order_id, timestamp).await
    }

    /// Cancel all open orders on up to five symbols
    pub async fn cancel_open_orders(
        &self,
        symbols: &[&str],
        timestamp: u64,
    ) -> RestResult<Vec<CancelAck>> {
        self.trading()?.cancel_open_orders(symbols, timestamp).await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        let creds = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(AccountEndpoints::new(self.transport.as_ref(), creds))
    }

    /// Get account state and balances
    pub async fn account_info(&self) -> RestResult<AccountInfo> {
        self.account()?.account_info().await
    }

    /// Get all per-asset balances
    pub async fn balances(&self) -> RestResult<Vec<Balance>> {
        self.account()?.balances().await
    }

    /// Get the balance of one asset
    pub async fn balance_for_asset(&self, asset: &str) -> RestResult<Balance> {
        self.account()?.balance_for_asset(asset).await
    }
}

impl std::fmt::Debug for MexcRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MexcRestClient")
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Base URL of the REST endpoint
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}
