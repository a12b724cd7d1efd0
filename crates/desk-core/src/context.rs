//! Per-dialog trade context.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::trade::{Exchange, Side, TicketId};

/// Immutable snapshot taken when a Buy/Sell dialog opens.
///
/// Carries the reference price and tradable balances the dialog works
/// against. The price is a snapshot and may already be stale by the
/// time the user submits; the backend quote is authoritative at
/// execution (see `quoted_at` / `price_age`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeContext {
    /// Correlation ID for this dialog instance.
    pub ticket_id: TicketId,
    /// Venue the order will be routed to.
    pub exchange: Exchange,
    /// Base asset symbol (e.g. "BTC").
    pub asset: String,
    /// Trade direction.
    pub side: Side,
    /// Price snapshot in quote currency per unit of asset.
    pub reference_price: Decimal,
    /// Balance the slider and amount field are denominated in:
    /// spendable quote balance for Buy, position market value for Sell.
    pub quote_balance: Decimal,
    /// Base asset quantity held; Sell only.
    pub asset_balance: Option<Decimal>,
    /// Buy of an asset with no existing position.
    pub is_new_asset: bool,
    /// When the reference price was quoted.
    pub quoted_at: DateTime<Utc>,
}

impl TradeContext {
    /// Context for a buy dialog. `quote_balance` is the spendable
    /// quote-currency balance on the venue.
    pub fn buy(
        exchange: Exchange,
        asset: impl Into<String>,
        reference_price: Decimal,
        quote_balance: Decimal,
        is_new_asset: bool,
    ) -> Result<Self> {
        check_non_negative(reference_price, quote_balance)?;
        Ok(Self {
            ticket_id: TicketId::new(),
            exchange,
            asset: asset.into(),
            side: Side::Buy,
            reference_price,
            quote_balance,
            asset_balance: None,
            is_new_asset,
            quoted_at: Utc::now(),
        })
    }

    /// Context for a sell dialog. The slider is denominated in the
    /// position's market value, derived here from the asset quantity
    /// and the price snapshot.
    pub fn sell(
        exchange: Exchange,
        asset: impl Into<String>,
        reference_price: Decimal,
        asset_balance: Decimal,
    ) -> Result<Self> {
        check_non_negative(reference_price, asset_balance)?;
        Ok(Self {
            ticket_id: TicketId::new(),
            exchange,
            asset: asset.into(),
            side: Side::Sell,
            reference_price,
            quote_balance: asset_balance * reference_price,
            asset_balance: Some(asset_balance),
            is_new_asset: false,
            quoted_at: Utc::now(),
        })
    }

    /// Balance the slider fraction maps onto (quote currency on both
    /// sides).
    #[inline]
    pub fn available_balance(&self) -> Decimal {
        self.quote_balance
    }

    /// Age of the price snapshot.
    pub fn price_age(&self) -> chrono::Duration {
        Utc::now() - self.quoted_at
    }
}

fn check_non_negative(price: Decimal, balance: Decimal) -> Result<()> {
    if price.is_sign_negative() {
        return Err(CoreError::InvalidPrice(price.to_string()));
    }
    if balance.is_sign_negative() {
        return Err(CoreError::InvalidBalance(balance.to_string()));
    }
    Ok(())
}
