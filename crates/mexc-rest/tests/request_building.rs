//! Request-building tests over a recording transport
//!
//! These tests exercise parameter assembly and signing end to end without
//! network I/O: a mock [`Transport`] records every request and replays
//! canned response bodies.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mexc_rest::{
    Credentials, HttpMethod, HttpRequest, MexcRestClient, OrderRequest, RequestSigner, RestError,
    RestResult, Transport,
};
use mexc_types::{KlineInterval, OrderSide};

/// Transport double: records requests, replays canned bodies
struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<String>>,
}

impl RecordingTransport {
    fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
        }
    }

    fn with_response(body: &str) -> Self {
        let transport = Self::new();
        transport
            .responses
            .lock()
            .unwrap()
            .push_back(body.to_string());
        transport
    }

    fn recorded(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> RestResult<String> {
        self.requests.lock().unwrap().push(request);
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "{}".to_string()))
    }
}

fn credentials() -> Credentials {
    Credentials::new("test-key", "test-secret")
}

fn public_client(transport: Arc<RecordingTransport>) -> MexcRestClient {
    MexcRestClient::with_transport(transport, None)
}

fn signed_client(transport: Arc<RecordingTransport>) -> MexcRestClient {
    MexcRestClient::with_transport(transport, Some(credentials()))
}

/// Split a signed payload into the signed prefix and the signature value
fn split_signature(payload: &str) -> (&str, &str) {
    payload
        .rsplit_once("&signature=")
        .expect("payload carries a signature")
}

// ============================================================================
// Market data
// ============================================================================

#[tokio::test]
async fn ping_is_true_on_empty_object() {
    let transport = Arc::new(RecordingTransport::with_response("{}"));
    let client = public_client(transport.clone());

    assert!(client.ping().await.unwrap());

    let requests = transport.recorded();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[0].path, "/api/v3/ping");
    assert!(requests[0].query.is_none());
    assert!(requests[0].api_key.is_none());
}

#[tokio::test]
async fn ping_is_false_on_unexpected_body() {
    let transport = Arc::new(RecordingTransport::with_response(r#"{"status":"down"}"#));
    let client = public_client(transport);

    assert!(!client.ping().await.unwrap());
}

#[tokio::test]
async fn order_book_defaults_limit_to_100() {
    let transport = Arc::new(RecordingTransport::with_response(
        r#"{"lastUpdateId":1,"bids":[],"asks":[]}"#,
    ));
    let client = public_client(transport.clone());

    client.order_book("BTCUSDT", None).await.unwrap();

    let requests = transport.recorded();
    assert_eq!(requests[0].path, "/api/v3/depth");
    assert_eq!(requests[0].query.as_deref(), Some("symbol=BTCUSDT&limit=100"));
}

#[tokio::test]
async fn order_book_limit_is_passed_through_unclamped() {
    let transport = Arc::new(RecordingTransport::with_response(
        r#"{"lastUpdateId":1,"bids":[],"asks":[]}"#,
    ));
    let client = public_client(transport.clone());

    client.order_book("BTCUSDT", Some(7000)).await.unwrap();

    let requests = transport.recorded();
    assert_eq!(
        requests[0].query.as_deref(),
        Some("symbol=BTCUSDT&limit=7000")
    );
}

#[tokio::test]
async fn recent_trades_defaults_limit_to_500() {
    let transport = Arc::new(RecordingTransport::with_response("[]"));
    let client = public_client(transport.clone());

    client.recent_trades("ETHUSDT", None).await.unwrap();

    let requests = transport.recorded();
    assert_eq!(requests[0].path, "/api/v3/trades");
    assert_eq!(requests[0].query.as_deref(), Some("symbol=ETHUSDT&limit=500"));
}

#[tokio::test]
async fn historical_trades_use_their_own_path() {
    let transport = Arc::new(RecordingTransport::with_response("[]"));
    let client = public_client(transport.clone());

    client.historical_trades("ETHUSDT", Some(1000)).await.unwrap();

    let requests = transport.recorded();
    assert_eq!(requests[0].path, "/api/v3/historicalTrades");
    assert_eq!(
        requests[0].query.as_deref(),
        Some("symbol=ETHUSDT&limit=1000")
    );
}

#[tokio::test]
async fn klines_hit_the_kline_path_with_interval() {
    let transport = Arc::new(RecordingTransport::with_response("[]"));
    let client = public_client(transport.clone());

    client
        .klines("BTCUSDT", KlineInterval::Hour1, None, None, None)
        .await
        .unwrap();

    let requests = transport.recorded();
    assert_eq!(requests[0].path, "/api/v3/klines");
    assert_eq!(
        requests[0].query.as_deref(),
        Some("symbol=BTCUSDT&interval=60m&limit=500")
    );
}

#[tokio::test]
async fn klines_send_time_range_only_when_given() {
    let transport = Arc::new(RecordingTransport::with_response("[]"));
    let client = public_client(transport.clone());

    client
        .klines(
            "BTCUSDT",
            KlineInterval::Min5,
            Some(1_640_000_000),
            Some(1_640_100_000),
            Some(750),
        )
        .await
        .unwrap();

    let requests = transport.recorded();
    assert_eq!(
        requests[0].query.as_deref(),
        Some("symbol=BTCUSDT&interval=5m&limit=750&startTime=1640000000&endTime=1640100000")
    );
}

#[tokio::test]
async fn average_price_sends_symbol_only() {
    let transport = Arc::new(RecordingTransport::with_response(
        r#"{"mins":5,"price":"42000.1"}"#,
    ));
    let client = public_client(transport.clone());

    let avg = client.average_price("BTCUSDT").await.unwrap();

    assert_eq!(avg.mins, 5);
    let requests = transport.recorded();
    assert_eq!(requests[0].path, "/api/v3/avgPrice");
    assert_eq!(requests[0].query.as_deref(), Some("symbol=BTCUSDT"));
}

// ============================================================================
// Order placement
// ============================================================================

#[tokio::test]
async fn place_order_builds_the_documented_parameter_order() {
    let transport = Arc::new(RecordingTransport::with_response(
        r#"{"symbol":"BTCUSDT","orderId":"C02__1","transactTime":1700000000000}"#,
    ));
    let client = signed_client(transport.clone());

    let order = OrderRequest::market("BTCUSDT", OrderSide::Buy, "0.25");
    client.place_order(&order, 1_700_000_000).await.unwrap();

    let requests = transport.recorded();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].path, "/api/v3/order");
    assert_eq!(requests[0].api_key.as_deref(), Some("test-key"));
    assert!(requests[0].query.is_none());

    let body = requests[0].form_body.as_deref().unwrap();
    let (signed_part, _) = split_signature(body);
    assert_eq!(
        signed_part,
        "symbol=BTCUSDT&side=BUY&type=MARKET&quantity=0.25&recvWindow=60000&timestamp=1700000000000"
    );
}

#[tokio::test]
async fn place_order_timestamp_is_seconds_times_1000() {
    let transport = Arc::new(RecordingTransport::with_response(
        r#"{"symbol":"BTCUSDT","orderId":"C02__1"}"#,
    ));
    let client = signed_client(transport.clone());

    let order = OrderRequest::market("BTCUSDT", OrderSide::Sell, "1");
    client.place_order(&order, 1_699_999_999).await.unwrap();

    let body = transport.recorded()[0].form_body.clone().unwrap();
    assert!(body.contains("&timestamp=1699999999000&"));
}

#[tokio::test]
async fn place_order_recv_window_override_replaces_default() {
    let transport = Arc::new(RecordingTransport::with_response(
        r#"{"symbol":"BTCUSDT","orderId":"C02__1"}"#,
    ));
    let client = signed_client(transport.clone());

    let order = OrderRequest::market("BTCUSDT", OrderSide::Buy, "1").with_recv_window(5_000);
    client.place_order(&order, 1_700_000_000).await.unwrap();

    let body = transport.recorded()[0].form_body.clone().unwrap();
    assert!(body.contains("&recvWindow=5000&timestamp="));
    assert!(!body.contains("recvWindow=60000"));
}

#[tokio::test]
async fn limit_order_normalizes_comma_decimal_separator() {
    let transport = Arc::new(RecordingTransport::with_response(
        r#"{"symbol":"BTCUSDT","orderId":"C02__1"}"#,
    ));
    let client = signed_client(transport.clone());

    let order = OrderRequest::limit("BTCUSDT", OrderSide::Buy, "2", "1,5");
    client.place_order(&order, 1_700_000_000).await.unwrap();

    let body = transport.recorded()[0].form_body.clone().unwrap();
    assert!(body.contains("&price=1.5&"));
    assert!(!body.contains("1%2C5"));
}

#[tokio::test]
async fn optional_order_fields_are_omitted_when_absent() {
    let transport = Arc::new(RecordingTransport::with_response(
        r#"{"symbol":"BTCUSDT","orderId":"C02__1"}"#,
    ));
    let client = signed_client(transport.clone());

    let order = OrderRequest::market("BTCUSDT", OrderSide::Buy, "1");
    client.place_order(&order, 1_700_000_000).await.unwrap();

    let body = transport.recorded()[0].form_body.clone().unwrap();
    assert!(!body.contains("quoteOrderQty"));
    assert!(!body.contains("price"));
    assert!(!body.contains("newClientOrderId"));
}

#[tokio::test]
async fn optional_order_fields_follow_the_fixed_prefix() {
    let transport = Arc::new(RecordingTransport::with_response(
        r#"{"symbol":"BTCUSDT","orderId":"C02__1"}"#,
    ));
    let client = signed_client(transport.clone());

    let order = OrderRequest::limit("BTCUSDT", OrderSide::Sell, "2", "31000.5")
        .with_quote_order_qty("62001")
        .with_client_order_id("mine-7");
    client.place_order(&order, 1_700_000_000).await.unwrap();

    let body = transport.recorded()[0].form_body.clone().unwrap();
    let (signed_part, _) = split_signature(body.as_str());
    assert_eq!(
        signed_part,
        "symbol=BTCUSDT&side=SELL&type=LIMIT&quantity=2&recvWindow=60000&timestamp=1700000000000&quoteOrderQty=62001&price=31000.5&newClientOrderId=mine-7"
    );
}

#[tokio::test]
async fn signed_body_matches_the_bytes_that_were_signed() {
    let transport = Arc::new(RecordingTransport::with_response(
        r#"{"symbol":"BTCUSDT","orderId":"C02__1"}"#,
    ));
    let client = signed_client(transport.clone());

    let order = OrderRequest::limit("BTCUSDT", OrderSide::Buy, "0.5", "30000");
    client.place_order(&order, 1_700_000_000).await.unwrap();

    let body = transport.recorded()[0].form_body.clone().unwrap();
    let (signed_part, signature) = split_signature(body.as_str());

    let creds = credentials();
    let signer = RequestSigner::new(&creds);
    assert_eq!(signature, signer.sign(signed_part));
}

#[tokio::test]
async fn test_order_uses_the_test_path() {
    let transport = Arc::new(RecordingTransport::with_response("{}"));
    let client = signed_client(transport.clone());

    let order = OrderRequest::market("BTCUSDT", OrderSide::Buy, "1");
    let echo = client.place_order_test(&order, 1_700_000_000).await.unwrap();

    assert_eq!(echo, serde_json::json!({}));
    let requests = transport.recorded();
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].path, "/api/v3/order/test");
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test]
async fn cancel_order_is_a_signed_delete() {
    let transport = Arc::new(RecordingTransport::with_response(
        r#"{"symbol":"BTCUSDT","orderId":"C02__9"}"#,
    ));
    let client = signed_client(transport.clone());

    client
        .cancel_order("BTCUSDT", "C02__9", 1_700_000_000)
        .await
        .unwrap();

    let requests = transport.recorded();
    assert_eq!(requests[0].method, HttpMethod::Delete);
    assert_eq!(requests[0].path, "/api/v3/order");

    let body = requests[0].form_body.as_deref().unwrap();
    let (signed_part, _) = split_signature(body);
    assert_eq!(
        signed_part,
        "timestamp=1700000000000&symbol=BTCUSDT&orderId=C02__9"
    );
}

#[tokio::test]
async fn cancel_open_orders_joins_up_to_five_symbols() {
    let transport = Arc::new(RecordingTransport::with_response("[]"));
    let client = signed_client(transport.clone());

    let symbols = ["AUSDT", "BUSDT", "CUSDT", "DUSDT", "EUSDT"];
    client
        .cancel_open_orders(&symbols, 1_700_000_000)
        .await
        .unwrap();

    let requests = transport.recorded();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Delete);
    assert_eq!(requests[0].path, "/api/v3/openOrders");

    let body = requests[0].form_body.as_deref().unwrap();
    let (signed_part, _) = split_signature(body);
    assert_eq!(
        signed_part,
        "timestamp=1700000000000&symbol=AUSDT%2CBUSDT%2CCUSDT%2CDUSDT%2CEUSDT"
    );
}

#[tokio::test]
async fn cancel_open_orders_rejects_six_symbols_without_a_network_call() {
    let transport = Arc::new(RecordingTransport::new());
    let client = signed_client(transport.clone());

    let symbols = ["AUSDT", "BUSDT", "CUSDT", "DUSDT", "EUSDT", "FUSDT"];
    let result = client.cancel_open_orders(&symbols, 1_700_000_000).await;

    assert!(matches!(result, Err(RestError::InvalidParameter(_))));
    assert!(transport.recorded().is_empty());
}

// ============================================================================
// Account
// ============================================================================

const ACCOUNT_BODY: &str = r#"{
    "canTrade": true,
    "canWithdraw": true,
    "canDeposit": true,
    "accountType": "SPOT",
    "balances": [
        {"asset": "BTC", "free": "0.5", "locked": "0.1"},
        {"asset": "USDT", "free": "1000", "locked": "0"}
    ],
    "permissions": ["SPOT"]
}"#;

#[tokio::test]
async fn account_info_is_a_signed_get() {
    let transport = Arc::new(RecordingTransport::with_response(ACCOUNT_BODY));
    let client = signed_client(transport.clone());

    let account = client.account_info().await.unwrap();
    assert_eq!(account.balances.len(), 2);

    let requests = transport.recorded();
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[0].path, "/api/v3/account");
    assert_eq!(requests[0].api_key.as_deref(), Some("test-key"));
    assert!(requests[0].form_body.is_none());

    let query = requests[0].query.as_deref().unwrap();
    let (signed_part, signature) = split_signature(query);
    assert!(signed_part.starts_with("timestamp="));
    // whole-second resolution, expressed in milliseconds
    assert!(signed_part.ends_with("000"));

    let creds = credentials();
    let signer = RequestSigner::new(&creds);
    assert_eq!(signature, signer.sign(signed_part));
}

#[tokio::test]
async fn balance_lookup_finds_existing_asset() {
    let transport = Arc::new(RecordingTransport::with_response(ACCOUNT_BODY));
    let client = signed_client(transport);

    let balance = client.balance_for_asset("USDT").await.unwrap();
    assert_eq!(balance.asset, "USDT");
    assert_eq!(balance.free, "1000");
}

#[tokio::test]
async fn balance_lookup_misses_with_a_defined_error() {
    let transport = Arc::new(RecordingTransport::with_response(ACCOUNT_BODY));
    let client = signed_client(transport);

    let result = client.balance_for_asset("DOGE").await;
    assert!(matches!(
        result,
        Err(RestError::AssetNotFound { asset }) if asset == "DOGE"
    ));
}

#[tokio::test]
async fn private_endpoints_require_credentials() {
    let transport = Arc::new(RecordingTransport::new());
    let client = public_client(transport.clone());

    let result = client.balances().await;
    assert!(matches!(result, Err(RestError::AuthRequired)));
    assert!(transport.recorded().is_empty());
}
