//! Trading endpoints for order placement and cancellation
//!
//! These endpoints require authentication. Parameters are assembled in a
//! fixed order, url-encoded once, signed, and the identical string is sent
//! as the request body with the signature appended.

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use crate::auth::{Credentials, RequestSigner};
use crate::error::{RestError, RestResult};
use crate::transport::{HttpMethod, HttpRequest, Transport};
use crate::types::{CancelAck, OrderAck, OrderRequest};

/// Receive window sent when the order carries no override
pub const DEFAULT_RECV_WINDOW_MS: u64 = 60_000;
/// Bulk cancellation accepts at most this many symbols
pub const MAX_CANCEL_SYMBOLS: usize = 5;

/// Trading endpoints for order management
pub struct TradingEndpoints<'a> {
    transport: &'a dyn Transport,
    credentials: &'a Credentials,
}

impl<'a> TradingEndpoints<'a> {
    pub fn new(transport: &'a dyn Transport, credentials: &'a Credentials) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    /// Sign the parameter list and send it as the form body
    async fn send_signed<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        params: &[(&str, String)],
    ) -> RestResult<T> {
        let signer = RequestSigner::new(self.credentials);
        let signed = signer.signed_query(params)?;

        let request = HttpRequest::new(method, path)
            .with_form_body(signed)
            .with_api_key(self.credentials.api_key());

        debug!(path, "Making authenticated request");

        let body = self.transport.send(request).await?;
        serde_json::from_str(&body).map_err(|e| RestError::Parse(e.to_string()))
    }

    /// Build the order parameter list in wire order
    ///
    /// `timestamp` is the caller's epoch seconds, converted to the epoch
    /// milliseconds the exchange expects. Optional fields are appended only
    /// when present; a comma decimal separator in the price is normalized
    /// to a period.
    fn order_params(order: &OrderRequest, timestamp: u64) -> Vec<(&'static str, String)> {
        let recv_window = order.recv_window.unwrap_or(DEFAULT_RECV_WINDOW_MS);
        let mut params: Vec<(&'static str, String)> = vec![
            ("symbol", order.symbol.clone()),
            ("side", order.side.as_str().to_string()),
            ("type", order.order_type.as_str().to_string()),
            ("quantity", order.quantity.clone()),
            ("recvWindow", recv_window.to_string()),
            ("timestamp", (timestamp * 1000).to_string()),
        ];

        if let Some(quote_order_qty) = &order.quote_order_qty {
            params.push(("quoteOrderQty", quote_order_qty.clone()));
        }
        if let Some(price) = &order.price {
            params.push(("price", price.replace(',', ".")));
        }
        if let Some(id) = &order.new_client_order_id {
            params.push(("newClientOrderId", id.clone()));
        }

        params
    }

    /// Validate an order without executing it
    ///
    /// POST /api/v3/order/test
    ///
    /// The exchange echoes the validated order (often an empty object);
    /// the body is returned verbatim.
    ///
    /// # Arguments
    /// * `order` - The order to validate
    /// * `timestamp` - Current time, unix seconds
    #[instrument(skip(self, order), fields(symbol = %order.symbol, side = %order.side, order_type = %order.order_type))]
    pub async fn place_order_test(
        &self,
        order: &OrderRequest,
        timestamp: u64,
    ) -> RestResult<serde_json::Value> {
        let params = Self::order_params(order, timestamp);

        info!(
            symbol = %order.symbol,
            side = %order.side,
            order_type = %order.order_type,
            quantity = %order.quantity,
            "Validating order"
        );

        self.send_signed(HttpMethod::Post, "/api/v3/order/test", &params)
            .await
    }

    /// Place a live order
    ///
    /// POST /api/v3/order
    ///
    /// # Arguments
    /// * `order` - The order to place
    /// * `timestamp` - Current time, unix seconds
    #[instrument(skip(self, order), fields(symbol = %order.symbol, side = %order.side, order_type = %order.order_type))]
    pub async fn place_order(&self, order: &OrderRequest, timestamp: u64) -> RestResult<OrderAck> {
        let params = Self::order_params(order, timestamp);

        info!(
            symbol = %order.symbol,
            side = %order.side,
            order_type = %order.order_type,
            quantity = %order.quantity,
            "Placing order"
        );

        let ack: OrderAck = self
            .send_signed(HttpMethod::Post, "/api/v3/order", &params)
            .await?;

        info!(order_id = %ack.order_id, "Order placed");
        Ok(ack)
    }

    /// Cancel an order
    ///
    /// DELETE /api/v3/order
    ///
    /// # Arguments
    /// * `symbol` - Instrument symbol
    /// * `order_id` - Exchange-assigned order id
    /// * `timestamp` - Current time, unix seconds
    #[instrument(skip(self))]
    pub async fn cancel_order(
        &self,
        symbol: &str,
        order_id: &str,
        timestamp: u64,
    ) -> RestResult<CancelAck> {
        let params = [
            ("timestamp", (timestamp * 1000).to_string()),
            ("symbol", symbol.to_string()),
            ("orderId", order_id.to_string()),
        ];

        info!(symbol, order_id, "Cancelling order");

        let ack: CancelAck = self
            .send_signed(HttpMethod::Delete, "/api/v3/order", &params)
            .await?;

        info!(order_id = %ack.order_id, "Order cancelled");
        Ok(ack)
    }

    /// Cancel all open orders on up to five symbols
    ///
    /// DELETE /api/v3/openOrders
    ///
    /// More than [`MAX_CANCEL_SYMBOLS`] symbols short-circuits with
    /// [`RestError::InvalidParameter`] before any network call.
    ///
    /// # Arguments
    /// * `symbols` - Instrument symbols, at most five
    /// * `timestamp` - Current time, unix seconds
    #[instrument(skip(self), fields(count = symbols.len()))]
    pub async fn cancel_open_orders(
        &self,
        symbols: &[&str],
        timestamp: u64,
    ) -> RestResult<Vec<CancelAck>> {
        if symbols.len() > MAX_CANCEL_SYMBOLS {
            return Err(RestError::InvalidParameter(format!(
                "at most {} symbols may be cancelled per call, got {}",
                MAX_CANCEL_SYMBOLS,
                symbols.len()
            )));
        }

        let params = [
            ("timestamp", (timestamp * 1000).to_string()),
            ("symbol", symbols.join(",")),
        ];

        info!(symbols = ?symbols, "Cancelling open orders");

        self.send_signed(HttpMethod::Delete, "/api/v3/openOrders", &params)
            .await
    }
}
