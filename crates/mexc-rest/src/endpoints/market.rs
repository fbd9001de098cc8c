//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::{RestError, RestResult};
use crate::transport::{HttpMethod, HttpRequest, Transport};
use crate::types::{AveragePrice, ExchangeInfo, Kline, OrderBook, ServerTime, Trade};
use mexc_types::KlineInterval;

/// Default order book depth when no limit is given
const DEFAULT_DEPTH_LIMIT: u32 = 100;
/// Default trade-list size when no limit is given
const DEFAULT_TRADES_LIMIT: u32 = 500;
/// Default kline-series size when no limit is given
const DEFAULT_KLINES_LIMIT: u32 = 500;

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    transport: &'a dyn Transport,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Perform an unsigned GET and decode the JSON body
    async fn get<T: DeserializeOwned>(&self, path: &str, query: Option<String>) -> RestResult<T> {
        let mut request = HttpRequest::new(HttpMethod::Get, path);
        request.query = query;

        let body = self.transport.send(request).await?;
        serde_json::from_str(&body).map_err(|e| RestError::Parse(e.to_string()))
    }

    /// Check connectivity to the REST endpoint
    ///
    /// Returns true iff the server answered with the empty JSON object.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> RestResult<bool> {
        let body = self
            .transport
            .send(HttpRequest::new(HttpMethod::Get, "/api/v3/ping"))
            .await?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| RestError::Parse(e.to_string()))?;

        Ok(value.as_object().is_some_and(|o| o.is_empty()))
    }

    /// Get server time
    #[instrument(skip(self))]
    pub async fn server_time(&self) -> RestResult<ServerTime> {
        debug!("Fetching server time");
        self.get("/api/v3/time", None).await
    }

    /// Get exchange metadata: trading rules and the full instrument listing
    #[instrument(skip(self))]
    pub async fn exchange_info(&self) -> RestResult<ExchangeInfo> {
        debug!("Fetching exchange info");
        self.get("/api/v3/exchangeInfo", None).await
    }

    /// Get the order book of a symbol
    ///
    /// # Arguments
    /// * `symbol` - Instrument symbol (e.g. "BTCUSDT")
    /// * `limit` - Number of levels, 100 to 5000 accepted by the exchange.
    ///   Defaults to 100. The value is passed through unmodified; the
    ///   exchange is authoritative about range enforcement.
    #[instrument(skip(self))]
    pub async fn order_book(&self, symbol: &str, limit: Option<u32>) -> RestResult<OrderBook> {
        let limit = limit.unwrap_or(DEFAULT_DEPTH_LIMIT);
        let query = format!("symbol={}&limit={}", symbol, limit);

        debug!(symbol, limit, "Fetching order book");
        self.get("/api/v3/depth", Some(query)).await
    }

    /// Get the most recent trades of a symbol
    ///
    /// # Arguments
    /// * `symbol` - Instrument symbol
    /// * `limit` - Number of trades, 500 to 1000 accepted by the exchange.
    ///   Defaults to 500, passed through unmodified.
    #[instrument(skip(self))]
    pub async fn recent_trades(&self, symbol: &str, limit: Option<u32>) -> RestResult<Vec<Trade>> {
        let limit = limit.unwrap_or(DEFAULT_TRADES_LIMIT);
        let query = format!("symbol={}&limit={}", symbol, limit);

        debug!(symbol, limit, "Fetching recent trades");
        self.get("/api/v3/trades", Some(query)).await
    }

    /// Get older trades of a symbol
    ///
    /// Same shape and limit range as [`recent_trades`](Self::recent_trades).
    #[instrument(skip(self))]
    pub async fn historical_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> RestResult<Vec<Trade>> {
        let limit = limit.unwrap_or(DEFAULT_TRADES_LIMIT);
        let query = format!("symbol={}&limit={}", symbol, limit);

        debug!(symbol, limit, "Fetching historical trades");
        self.get("/api/v3/historicalTrades", Some(query)).await
    }

    /// Get the candlestick series of a symbol
    ///
    /// # Arguments
    /// * `symbol` - Instrument symbol
    /// * `interval` - Candlestick bucket size
    /// * `start_time` - Earliest bucket, unix timestamp; sent only when given
    /// * `end_time` - Latest bucket, unix timestamp; sent only when given
    /// * `limit` - Number of rows, 500 to 1000 accepted by the exchange.
    ///   Defaults to 500, passed through unmodified.
    #[instrument(skip(self))]
    pub async fn klines(
        &self,
        symbol: &str,
        interval: KlineInterval,
        start_time: Option<u64>,
        end_time: Option<u64>,
        limit: Option<u32>,
    ) -> RestResult<Vec<Kline>> {
        let limit = limit.unwrap_or(DEFAULT_KLINES_LIMIT);
        let mut query = format!("symbol={}&interval={}&limit={}", symbol, interval, limit);

        if let Some(start_time) = start_time {
            query.push_str(&format!("&startTime={}", start_time));
        }
        if let Some(end_time) = end_time {
            query.push_str(&format!("&endTime={}", end_time));
        }

        debug!(symbol, interval = interval.as_str(), limit, "Fetching klines");
        self.get("/api/v3/klines", Some(query)).await
    }

    /// Get the current average price of a symbol
    #[instrument(skip(self))]
    pub async fn average_price(&self, symbol: &str) -> RestResult<AveragePrice> {
        let query = format!("symbol={}", symbol);

        debug!(symbol, "Fetching average price");
        self.get("/api/v3/avgPrice", Some(query)).await
    }
}
