//! Constraint checks run on every submit attempt.

use desk_core::{parse_amount, TradeContext};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::sync::SyncState;

/// Why a submit attempt was rejected before reaching the network.
///
/// The `Display` strings are the inline field errors shown in the
/// dialog; editing the input is the retry path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid amount")]
    EmptyOrNonPositive,

    #[error("Amount exceeds available balance")]
    ExceedsBalance,

    #[error("Quantity exceeds available balance")]
    ExceedsQuantityBalance,
}

/// Amount and quantity captured at validation time.
///
/// The submit flow uses only this capture, so a slider edit during an
/// in-flight authorization cannot silently change what gets submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidOrder {
    /// Quote-currency amount.
    pub amount: Decimal,
    /// Derived base asset quantity.
    pub quantity: Decimal,
}

/// Validate the current input state against the dialog's context.
///
/// Sells carry a second ceiling: rounding in the price-to-quantity
/// conversion can keep the nominal amount under the quote balance while
/// the derived quantity overshoots the asset balance. Both checks must
/// pass.
pub fn validate(ctx: &TradeContext, state: &SyncState) -> Result<ValidOrder, ValidationError> {
    let amount = parse_amount(state.amount_text()).ok_or(ValidationError::EmptyOrNonPositive)?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::EmptyOrNonPositive);
    }
    if amount > ctx.quote_balance {
        return Err(ValidationError::ExceedsBalance);
    }

    let quantity = state.quantity();
    if let Some(asset_balance) = ctx.asset_balance {
        if quantity > asset_balance {
            return Err(ValidationError::ExceedsQuantityBalance);
        }
    }

    Ok(ValidOrder { amount, quantity })
}
