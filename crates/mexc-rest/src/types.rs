//! Types for MEXC REST API requests and responses
//!
//! Numeric exchange fields stay strings on the wire; `rust_decimal`
//! helpers are provided where callers usually want numbers.

use rust_decimal::Decimal;
use serde::Deserialize;

use mexc_types::{OrderSide, OrderType};

// ============================================================================
// Market Data Types
// ============================================================================

/// Server time response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
    /// Server timestamp in epoch milliseconds
    pub server_time: u64,
}

/// Exchange metadata: trading rules and instrument listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeInfo {
    /// Server timezone (UTC)
    pub timezone: String,
    /// Server timestamp in epoch milliseconds
    pub server_time: u64,
    /// All listed instruments
    pub symbols: Vec<SymbolInfo>,
}

/// Per-instrument listing entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    /// Instrument symbol (e.g. "BTCUSDT")
    pub symbol: String,
    /// Trading status
    pub status: String,
    /// Base asset code
    pub base_asset: String,
    /// Quote asset code
    pub quote_asset: String,
    /// Base asset precision
    #[serde(default)]
    pub base_asset_precision: Option<u32>,
    /// Quote asset precision
    #[serde(default)]
    pub quote_asset_precision: Option<u32>,
    /// Order types permitted for this instrument
    #[serde(default)]
    pub order_types: Vec<String>,
    /// Whether spot trading is currently allowed
    #[serde(default)]
    pub is_spot_trading_allowed: bool,
}

/// Order book snapshot
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    /// Last update id of the snapshot
    pub last_update_id: u64,
    /// Bid levels as [price, quantity] pairs, best first
    pub bids: Vec<Vec<String>>,
    /// Ask levels as [price, quantity] pairs, best first
    pub asks: Vec<Vec<String>>,
}

impl OrderBook {
    /// Get the best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().and_then(|level| level.first()?.parse().ok())
    }

    /// Get the best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().and_then(|level| level.first()?.parse().ok())
    }

    /// Get the spread
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }
}

/// A single trade record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// Trade id (absent for some instruments)
    #[serde(default)]
    pub id: Option<u64>,
    /// Execution price
    pub price: String,
    /// Executed quantity
    pub qty: String,
    /// Trade total in quote units
    pub quote_qty: String,
    /// Trade time in epoch milliseconds
    pub time: u64,
    /// Whether the buyer was the maker
    pub is_buyer_maker: bool,
    /// Whether the trade was the best price match
    pub is_best_match: bool,
}

impl Trade {
    /// Get the execution price
    pub fn price(&self) -> Option<Decimal> {
        self.price.parse().ok()
    }

    /// Get the executed quantity
    pub fn qty(&self) -> Option<Decimal> {
        self.qty.parse().ok()
    }
}

/// One candlestick row
///
/// Wire format is a JSON array:
/// `[open time, open, high, low, close, volume, close time, quote volume]`
#[derive(Debug, Clone, Deserialize)]
pub struct Kline(
    pub u64,
    pub String,
    pub String,
    pub String,
    pub String,
    pub String,
    pub u64,
    pub String,
);

impl Kline {
    /// Bucket open time in epoch milliseconds
    pub fn open_time(&self) -> u64 {
        self.0
    }

    /// Open price
    pub fn open(&self) -> Option<Decimal> {
        self.1.parse().ok()
    }

    /// High price
    pub fn high(&self) -> Option<Decimal> {
        self.2.parse().ok()
    }

    /// Low price
    pub fn low(&self) -> Option<Decimal> {
        self.3.parse().ok()
    }

    /// Close price
    pub fn close(&self) -> Option<Decimal> {
        self.4.parse().ok()
    }

    /// Base asset volume
    pub fn volume(&self) -> Option<Decimal> {
        self.5.parse().ok()
    }

    /// Bucket close time in epoch milliseconds
    pub fn close_time(&self) -> u64 {
        self.6
    }

    /// Quote asset volume
    pub fn quote_volume(&self) -> Option<Decimal> {
        self.7.parse().ok()
    }
}

/// Current average price over the exchange's window
#[derive(Debug, Clone, Deserialize)]
pub struct AveragePrice {
    /// Averaging window in minutes
    pub mins: u64,
    /// Average price
    pub price: String,
}

impl AveragePrice {
    /// Get the average price
    pub fn price(&self) -> Option<Decimal> {
        self.price.parse().ok()
    }
}

// ============================================================================
// Trading Types
// ============================================================================

/// Request to place an order
///
/// Quantity and price are opaque strings; no rounding or numeric
/// validation is performed client-side, the exchange is authoritative.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    /// Instrument symbol (e.g. "BTCUSDT")
    pub symbol: String,
    /// Order side
    pub side: OrderSide,
    /// Order type
    pub order_type: OrderType,
    /// Order quantity in base units
    pub quantity: String,
    /// Order total in quote units (optional alternative sizing)
    pub quote_order_qty: Option<String>,
    /// Limit price (required by the exchange for limit orders)
    pub price: Option<String>,
    /// Caller-assigned order id
    pub new_client_order_id: Option<String>,
    /// Receive-window override in milliseconds
    pub recv_window: Option<u64>,
}

impl OrderRequest {
    /// Create an order request with only the required fields
    pub fn new(
        symbol: impl Into<String>,
        side: OrderSide,
        order_type: OrderType,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type,
            quantity: quantity.into(),
            quote_order_qty: None,
            price: None,
            new_client_order_id: None,
            recv_window: None,
        }
    }

    /// Create a market order
    pub fn market(symbol: impl Into<String>, side: OrderSide, quantity: impl Into<String>) -> Self {
        Self::new(symbol, side, OrderType::Market, quantity)
    }

    /// Create a limit order
    pub fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        let mut order = Self::new(symbol, side, OrderType::Limit, quantity);
        order.price = Some(price.into());
        order
    }

    /// Set the quote-unit order total
    pub fn with_quote_order_qty(mut self, quote_order_qty: impl Into<String>) -> Self {
        self.quote_order_qty = Some(quote_order_qty.into());
        self
    }

    /// Set the limit price
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// Set a caller-assigned order id
    pub fn with_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.new_client_order_id = Some(id.into());
        self
    }

    /// Override the receive window for this order
    pub fn with_recv_window(mut self, recv_window_ms: u64) -> Self {
        self.recv_window = Some(recv_window_ms);
        self
    }
}

/// Response from placing a live order
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAck {
    /// Instrument symbol
    pub symbol: String,
    /// Exchange-assigned order id
    pub order_id: String,
    /// Order price as submitted
    #[serde(default)]
    pub price: Option<String>,
    /// Original quantity
    #[serde(default)]
    pub orig_qty: Option<String>,
    /// Order type
    #[serde(rename = "type", default)]
    pub order_type: Option<String>,
    /// Order side
    #[serde(default)]
    pub side: Option<String>,
    /// Transaction time in epoch milliseconds
    #[serde(default)]
    pub transact_time: Option<u64>,
}

/// Cancellation confirmation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAck {
    /// Instrument symbol
    pub symbol: String,
    /// Exchange-assigned order id
    pub order_id: String,
    /// Original client order id, if one was set
    #[serde(default)]
    pub orig_client_order_id: Option<String>,
    /// Order price
    #[serde(default)]
    pub price: Option<String>,
    /// Original quantity
    #[serde(default)]
    pub orig_qty: Option<String>,
    /// Order type
    #[serde(rename = "type", default)]
    pub order_type: Option<String>,
    /// Order side
    #[serde(default)]
    pub side: Option<String>,
    /// Order status after cancellation
    #[serde(default)]
    pub status: Option<String>,
}

// ============================================================================
// Account Types
// ============================================================================

/// Account state and balances
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    /// Whether trading is enabled
    pub can_trade: bool,
    /// Whether withdrawals are enabled
    pub can_withdraw: bool,
    /// Whether deposits are enabled
    pub can_deposit: bool,
    /// Account type (e.g. "SPOT")
    #[serde(default)]
    pub account_type: Option<String>,
    /// Per-asset balances
    pub balances: Vec<Balance>,
    /// Account permissions
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Balance record for one asset
#[derive(Debug, Clone, Deserialize)]
pub struct Balance {
    /// Asset code (e.g. "BTC")
    pub asset: String,
    /// Available amount
    pub free: String,
    /// Amount locked in open orders
    pub locked: String,
}

impl Balance {
    /// Get the available amount
    pub fn free(&self) -> Option<Decimal> {
        self.free.parse().ok()
    }

    /// Get the locked amount
    pub fn locked(&self) -> Option<Decimal> {
        self.locked.parse().ok()
    }

    /// Get the total amount (free + locked)
    pub fn total(&self) -> Option<Decimal> {
        Some(self.free()? + self.locked()?)
    }
}
