//! Price and balance collaborator traits.
//!
//! Both are consulted once, when a dialog opens, to build the
//! `TradeContext` snapshot. Neither is re-queried mid-edit; the backend
//! quote is authoritative at execution time.

use std::collections::HashMap;

use desk_core::{BoxFuture, Exchange, Side};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors from the price/balance collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("No price available for {asset} on {exchange}")]
    PriceUnavailable { exchange: Exchange, asset: String },

    #[error("No tradable balance for {asset} on {exchange}")]
    BalanceUnavailable { exchange: Exchange, asset: String },
}

/// Supplies the current price for an asset/exchange pair.
pub trait PriceOracle: Send + Sync {
    /// Quote-currency price per unit of `asset`.
    fn price(&self, exchange: Exchange, asset: &str) -> BoxFuture<'_, Result<Decimal, OracleError>>;
}

/// Supplies the tradable balance for a dialog.
pub trait BalanceProvider: Send + Sync {
    /// Sell: base asset quantity held on the venue.
    /// Buy: spendable quote-currency balance on the venue.
    fn available_balance(
        &self,
        exchange: Exchange,
        side: Side,
        asset: &str,
    ) -> BoxFuture<'_, Result<Decimal, OracleError>>;
}

/// Map-backed oracle, used in tests and as the cache-fed implementation
/// behind a portfolio snapshot.
#[derive(Debug, Default)]
pub struct StaticPriceOracle {
    prices: HashMap<(Exchange, String), Decimal>,
}

impl StaticPriceOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, exchange: Exchange, asset: &str, price: Decimal) -> Self {
        self.prices.insert((exchange, asset.to_string()), price);
        self
    }
}

impl PriceOracle for StaticPriceOracle {
    fn price(&self, exchange: Exchange, asset: &str) -> BoxFuture<'_, Result<Decimal, OracleError>> {
        let result = self
            .prices
            .get(&(exchange, asset.to_string()))
            .copied()
            .ok_or_else(|| OracleError::PriceUnavailable {
                exchange,
                asset: asset.to_string(),
            });
        Box::pin(async move { result })
    }
}

/// Map-backed balance provider for tests.
#[derive(Debug, Default)]
pub struct StaticBalanceProvider {
    asset_balances: HashMap<(Exchange, String), Decimal>,
    quote_balances: HashMap<Exchange, Decimal>,
}

impl StaticBalanceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base asset quantity held (consulted for sells).
    pub fn with_asset_balance(mut self, exchange: Exchange, asset: &str, qty: Decimal) -> Self {
        self.asset_balances.insert((exchange, asset.to_string()), qty);
        self
    }

    /// Spendable quote balance (consulted for buys).
    pub fn with_quote_balance(mut self, exchange: Exchange, balance: Decimal) -> Self {
        self.quote_balances.insert(exchange, balance);
        self
    }
}

impl BalanceProvider for StaticBalanceProvider {
    fn available_balance(
        &self,
        exchange: Exchange,
        side: Side,
        asset: &str,
    ) -> BoxFuture<'_, Result<Decimal, OracleError>> {
        let result = match side {
            Side::Sell => self.asset_balances.get(&(exchange, asset.to_string())).copied(),
            Side::Buy => self.quote_balances.get(&exchange).copied(),
        }
        .ok_or_else(|| OracleError::BalanceUnavailable {
            exchange,
            asset: asset.to_string(),
        });
        Box::pin(async move { result })
    }
}
