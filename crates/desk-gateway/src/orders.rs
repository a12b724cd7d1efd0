//! Order submission collaborator contract.
//!
//! Provides a trait-based abstraction over the trading backend's order
//! endpoint. This allows for:
//! - Dependency injection for testing
//! - Separation of ticket logic from transport
//!
//! The backend has two failure channels: a transport error (network,
//! timeout, 5xx) and a structured `success: false` ack carrying a raw
//! exchange-native error string. Both funnel into `classify`.

use std::sync::Arc;
use std::time::Duration;

use desk_core::{BoxFuture, Exchange, Side, TicketId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the order size is denominated on the wire.
///
/// Buys spend a quote-currency amount; sells liquidate a base asset
/// quantity. The backend accepts exactly one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderAmount {
    /// Quote-currency notional (e.g. USDT to spend).
    Quote(Decimal),
    /// Base asset quantity (e.g. BTC to sell).
    Base(Decimal),
}

/// A validated, authorized order ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub ticket_id: TicketId,
    pub exchange: Exchange,
    pub asset: String,
    pub side: Side,
    pub amount: OrderAmount,
}

/// Backend acknowledgement for an order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAck {
    pub success: bool,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub filled_quantity: Option<Decimal>,
    #[serde(default)]
    pub error: Option<String>,
}

impl OrderAck {
    pub fn accepted(order_id: Option<String>, filled_quantity: Option<Decimal>) -> Self {
        Self {
            success: true,
            order_id,
            filled_quantity,
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            order_id: None,
            filled_quantity: None,
            error: Some(error.into()),
        }
    }
}

/// Transport-level submission failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Order request failed: {0}")]
    Transport(String),

    #[error("Order request timed out")]
    Timeout,
}

/// Trait for submitting orders to the trading backend.
pub trait OrderGateway: Send + Sync {
    /// Submit an order. Single-shot; the caller applies its own timeout.
    fn place_order(&self, request: OrderRequest) -> BoxFuture<'_, Result<OrderAck, GatewayError>>;
}

/// Arc wrapper for OrderGateway trait objects.
pub type DynOrderGateway = Arc<dyn OrderGateway>;

/// Mock order gateway for testing.
#[derive(Debug)]
pub struct MockOrderGateway {
    /// Recorded requests for verification.
    requests: parking_lot::Mutex<Vec<OrderRequest>>,
    /// Next result to return.
    next_result: parking_lot::Mutex<Result<OrderAck, GatewayError>>,
    /// Artificial response delay (for timeout tests).
    delay: parking_lot::Mutex<Option<Duration>>,
}

impl Default for MockOrderGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockOrderGateway {
    /// Create a new mock gateway that accepts everything.
    pub fn new() -> Self {
        Self {
            requests: parking_lot::Mutex::new(Vec::new()),
            next_result: parking_lot::Mutex::new(Ok(OrderAck::accepted(None, None))),
            delay: parking_lot::Mutex::new(None),
        }
    }

    /// Set the next result to return.
    pub fn set_next_result(&self, result: Result<OrderAck, GatewayError>) {
        *self.next_result.lock() = result;
    }

    /// Delay every response by `delay`.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    /// Get recorded requests.
    pub fn requests(&self) -> Vec<OrderRequest> {
        self.requests.lock().clone()
    }
}

impl OrderGateway for MockOrderGateway {
    fn place_order(&self, request: OrderRequest) -> BoxFuture<'_, Result<OrderAck, GatewayError>> {
        self.requests.lock().push(request);
        let result = self.next_result.lock().clone();
        let delay = *self.delay.lock();
        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_request() -> OrderRequest {
        OrderRequest {
            ticket_id: TicketId::new(),
            exchange: Exchange::Binance,
            asset: "BTC".to_string(),
            side: Side::Sell,
            amount: OrderAmount::Base(dec!(5)),
        }
    }

    #[tokio::test]
    async fn test_mock_gateway_records_requests() {
        let gateway = MockOrderGateway::new();
        let req = sample_request();

        let ack = gateway.place_order(req.clone()).await.unwrap();
        assert!(ack.success);
        assert_eq!(gateway.requests(), vec![req]);
    }

    #[tokio::test]
    async fn test_mock_gateway_returns_configured_result() {
        let gateway = MockOrderGateway::new();
        gateway.set_next_result(Ok(OrderAck::rejected("Insufficient balance")));

        let ack = gateway.place_order(sample_request()).await.unwrap();
        assert!(!ack.success);
        assert_eq!(ack.error.as_deref(), Some("Insufficient balance"));
    }

    #[test]
    fn test_ack_deserializes_backend_shape() {
        // Backend may omit optional fields entirely.
        let ack: OrderAck =
            serde_json::from_str(r#"{"success": true, "filled_quantity": "0.005"}"#).unwrap();
        assert!(ack.success);
        assert_eq!(ack.filled_quantity, Some(dec!(0.005)));
        assert_eq!(ack.order_id, None);

        let rejected: OrderAck =
            serde_json::from_str(r#"{"success": false, "error": "MIN_NOTIONAL not met"}"#).unwrap();
        assert_eq!(rejected.error.as_deref(), Some("MIN_NOTIONAL not met"));
    }

    #[test]
    fn test_gateway_error_display() {
        assert_eq!(
            GatewayError::Timeout.to_string(),
            "Order request timed out"
        );
        assert_eq!(
            GatewayError::Transport("connection reset".into()).to_string(),
            "Order request failed: connection reset"
        );
    }
}
