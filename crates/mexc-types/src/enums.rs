//! OrderSide, OrderType, and KlineInterval enums
//!
//! Each variant carries the exact string the exchange expects on the wire.

use serde::{Deserialize, Serialize};

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl OrderSide {
    /// Returns the side as used in API requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }

    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order types supported by the spot API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Limit order - executes at the specified price or better
    Limit,
    /// Market order - executes immediately at best available price
    Market,
    /// Limit order that is rejected if it would trade immediately
    LimitMaker,
    /// Fills what it can immediately, cancels the rest
    ImmediateOrCancel,
    /// Fills completely or not at all
    FillOrKill,
}

impl OrderType {
    /// Returns the order type as used in API requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "LIMIT",
            Self::Market => "MARKET",
            Self::LimitMaker => "LIMIT_MAKER",
            Self::ImmediateOrCancel => "IMMEDIATE_OR_CANCEL",
            Self::FillOrKill => "FILL_OR_KILL",
        }
    }

    /// Returns true if this order type carries a limit price
    pub fn requires_price(&self) -> bool {
        matches!(self, Self::Limit | Self::LimitMaker)
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candlestick interval for kline requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KlineInterval {
    /// 1 minute
    #[serde(rename = "1m")]
    Min1,
    /// 5 minutes
    #[serde(rename = "5m")]
    Min5,
    /// 15 minutes
    #[serde(rename = "15m")]
    Min15,
    /// 30 minutes
    #[serde(rename = "30m")]
    Min30,
    /// 1 hour
    #[serde(rename = "60m")]
    Hour1,
    /// 4 hours
    #[serde(rename = "4h")]
    Hour4,
    /// 1 day
    #[serde(rename = "1d")]
    Day1,
    /// 1 week
    #[serde(rename = "1W")]
    Week1,
    /// 1 month
    #[serde(rename = "1M")]
    Month1,
}

impl KlineInterval {
    /// Returns the interval as used in API requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Min1 => "1m",
            Self::Min5 => "5m",
            Self::Min15 => "15m",
            Self::Min30 => "30m",
            Self::Hour1 => "60m",
            Self::Hour4 => "4h",
            Self::Day1 => "1d",
            Self::Week1 => "1W",
            Self::Month1 => "1M",
        }
    }
}

impl std::fmt::Display for KlineInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
