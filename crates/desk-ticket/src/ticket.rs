//! The trade ticket: one instance per open Buy/Sell dialog.

use desk_auth::{AuthorizationGate, AuthorizationOutcome};
use desk_core::{Exchange, Fraction, Side, TradeContext};
use desk_gateway::{
    classify, BalanceProvider, DynOrderGateway, GatewayError, OrderAmount, OrderGateway,
    OrderRequest, PriceOracle,
};
use rust_decimal::Decimal;
use tracing::{debug, info, trace, warn};

use crate::config::TicketConfig;
use crate::error::TicketResult;
use crate::sync::SyncState;
use crate::validate::{validate, ValidationError};

/// Where the ticket is in its lifecycle.
///
/// While not `Editing`, the UI must keep the submit control and amount
/// inputs disabled; the engine also drops input writes on the floor so
/// a UI that polls between await points cannot mutate a submission in
/// flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketPhase {
    /// Accepting input.
    Editing,
    /// Biometric challenge pending.
    Authorizing,
    /// Order request in flight.
    Submitting,
}

/// Result of one submit attempt. Every variant leaves the dialog open
/// with the entered amount intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Order accepted by the backend.
    Accepted {
        order_id: Option<String>,
        filled_quantity: Option<Decimal>,
    },
    /// Local validation failed; rendered as an inline field error.
    InvalidInput(ValidationError),
    /// Biometric challenge failed, with a human-readable message.
    AuthorizationDenied(String),
    /// User dismissed the biometric prompt.
    AuthorizationCancelled,
    /// Backend or transport rejected the order; classified message.
    Rejected(String),
}

/// State and control flow for one Buy/Sell dialog.
///
/// All collaborators are passed in explicitly; the ticket holds no
/// ambient singletons. Input handling is synchronous; the only
/// suspension points are the biometric challenge and the order call.
pub struct TradeTicket {
    ctx: TradeContext,
    state: SyncState,
    phase: TicketPhase,
    gate: AuthorizationGate,
    gateway: DynOrderGateway,
    config: TicketConfig,
}

impl TradeTicket {
    /// Build a ticket from an already-fetched context snapshot.
    pub fn new(
        ctx: TradeContext,
        gate: AuthorizationGate,
        gateway: DynOrderGateway,
        config: TicketConfig,
    ) -> Self {
        let state = SyncState::opening(&ctx);
        Self {
            ctx,
            state,
            phase: TicketPhase::Editing,
            gate,
            gateway,
            config,
        }
    }

    /// Open a buy dialog: snapshot the price and the spendable quote
    /// balance, then seed the input state at 0%.
    #[allow(clippy::too_many_arguments)]
    pub async fn open_buy(
        oracle: &dyn PriceOracle,
        balances: &dyn BalanceProvider,
        gate: AuthorizationGate,
        gateway: DynOrderGateway,
        config: TicketConfig,
        exchange: Exchange,
        asset: &str,
        is_new_asset: bool,
    ) -> TicketResult<Self> {
        let price = oracle.price(exchange, asset).await?;
        let quote_balance = balances
            .available_balance(exchange, Side::Buy, asset)
            .await?;
        let ctx = TradeContext::buy(exchange, asset, price, quote_balance, is_new_asset)?;
        info!(ticket_id = %ctx.ticket_id, %exchange, asset, %price, "opened buy ticket");
        Ok(Self::new(ctx, gate, gateway, config))
    }

    /// Open a sell dialog: snapshot the price and the held quantity,
    /// then seed the input state at 100% of the position.
    pub async fn open_sell(
        oracle: &dyn PriceOracle,
        balances: &dyn BalanceProvider,
        gate: AuthorizationGate,
        gateway: DynOrderGateway,
        config: TicketConfig,
        exchange: Exchange,
        asset: &str,
    ) -> TicketResult<Self> {
        let price = oracle.price(exchange, asset).await?;
        let asset_balance = balances
            .available_balance(exchange, Side::Sell, asset)
            .await?;
        let ctx = TradeContext::sell(exchange, asset, price, asset_balance)?;
        info!(ticket_id = %ctx.ticket_id, %exchange, asset, %price, "opened sell ticket");
        Ok(Self::new(ctx, gate, gateway, config))
    }

    /// Slider moved. Ignored while a submission is in flight.
    pub fn set_slider_fraction(&mut self, fraction: Fraction) {
        if self.is_busy() {
            trace!(ticket_id = %self.ctx.ticket_id, "slider edit ignored while busy");
            return;
        }
        self.state.apply_slider(&self.ctx, fraction);
    }

    /// Amount text edited. Ignored while a submission is in flight.
    pub fn set_amount_text(&mut self, text: &str) {
        if self.is_busy() {
            trace!(ticket_id = %self.ctx.ticket_id, "amount edit ignored while busy");
            return;
        }
        self.state.apply_amount_text(&self.ctx, text);
    }

    /// Observable input state for rendering.
    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn context(&self) -> &TradeContext {
        &self.ctx
    }

    pub fn phase(&self) -> TicketPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase != TicketPhase::Editing
    }

    /// Validate, authorize, and submit the current input.
    ///
    /// Single-shot and not cancellable; the phase transitions make the
    /// in-flight window observable so the UI can disable its controls.
    /// Every path returns the phase to `Editing` without clearing the
    /// entered amount.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let valid = match validate(&self.ctx, &self.state) {
            Ok(valid) => valid,
            Err(reason) => {
                debug!(ticket_id = %self.ctx.ticket_id, %reason, "submit blocked by validation");
                return SubmitOutcome::InvalidInput(reason);
            }
        };

        let age_secs = self.ctx.price_age().num_seconds();
        if age_secs > self.config.stale_price_warn_secs as i64 {
            // The backend quote is authoritative; we only flag the window.
            warn!(
                ticket_id = %self.ctx.ticket_id,
                age_secs,
                "price snapshot is stale, backend may re-quote or reject"
            );
        }

        self.phase = TicketPhase::Authorizing;
        match self.gate.authorize(&self.ctx, valid.quantity).await {
            AuthorizationOutcome::NotRequired | AuthorizationOutcome::Granted => {}
            AuthorizationOutcome::Denied(message) => {
                self.phase = TicketPhase::Editing;
                return SubmitOutcome::AuthorizationDenied(message);
            }
            AuthorizationOutcome::Cancelled => {
                self.phase = TicketPhase::Editing;
                return SubmitOutcome::AuthorizationCancelled;
            }
        }

        self.phase = TicketPhase::Submitting;
        let request = OrderRequest {
            ticket_id: self.ctx.ticket_id.clone(),
            exchange: self.ctx.exchange,
            asset: self.ctx.asset.clone(),
            side: self.ctx.side,
            amount: match self.ctx.side {
                Side::Buy => OrderAmount::Quote(valid.amount),
                Side::Sell => OrderAmount::Base(valid.quantity),
            },
        };
        info!(
            ticket_id = %self.ctx.ticket_id,
            exchange = %self.ctx.exchange,
            asset = %self.ctx.asset,
            side = %self.ctx.side,
            "submitting order"
        );

        let result = match tokio::time::timeout(
            self.config.submit_timeout(),
            self.gateway.place_order(request),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(GatewayError::Timeout),
        };
        self.phase = TicketPhase::Editing;

        match result {
            Ok(ack) if ack.success => {
                info!(
                    ticket_id = %self.ctx.ticket_id,
                    order_id = ack.order_id.as_deref().unwrap_or("-"),
                    "order accepted"
                );
                SubmitOutcome::Accepted {
                    order_id: ack.order_id,
                    filled_quantity: ack.filled_quantity,
                }
            }
            Ok(ack) => {
                let raw = ack.error.unwrap_or_else(|| "Unknown error".to_string());
                let message = classify(&raw);
                warn!(ticket_id = %self.ctx.ticket_id, raw = %raw, "order rejected by backend");
                SubmitOutcome::Rejected(message)
            }
            Err(err) => {
                let message = classify(&err.to_string());
                warn!(ticket_id = %self.ctx.ticket_id, error = %err, "order submission failed");
                SubmitOutcome::Rejected(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_auth::MockBiometric;
    use desk_gateway::MockOrderGateway;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn sell_ticket(gateway: Arc<MockOrderGateway>) -> TradeTicket {
        let ctx = TradeContext::sell(Exchange::Binance, "BTC", dec!(50), dec!(5)).unwrap();
        let gate = AuthorizationGate::new(Arc::new(MockBiometric::new()));
        TradeTicket::new(ctx, gate, gateway, TicketConfig::default())
    }

    #[tokio::test]
    async fn test_invalid_input_short_circuits() {
        let gateway = Arc::new(MockOrderGateway::new());
        let mut ticket = sell_ticket(gateway.clone());
        ticket.set_amount_text("abc");

        let outcome = ticket.submit().await;
        assert_eq!(
            outcome,
            SubmitOutcome::InvalidInput(ValidationError::EmptyOrNonPositive)
        );
        assert!(gateway.requests().is_empty());
        assert_eq!(ticket.phase(), TicketPhase::Editing);
    }

    #[tokio::test]
    async fn test_submit_resets_phase_on_success() {
        let gateway = Arc::new(MockOrderGateway::new());
        let mut ticket = sell_ticket(gateway);

        let outcome = ticket.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Accepted { .. }));
        assert!(!ticket.is_busy());
    }
}
