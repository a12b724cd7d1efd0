//! Precision-safe decimal helpers for trade amounts.
//!
//! Uses `rust_decimal` for exact decimal arithmetic, avoiding
//! floating-point rounding errors critical in financial calculations.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Slider position as a fraction of the available balance.
///
/// Always within [0, 1]; construction clamps rather than errors so a
/// UI control can never push an out-of-range value into the sync state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fraction(Decimal);

impl Fraction {
    pub const ZERO: Self = Self(Decimal::ZERO);
    pub const ONE: Self = Self(Decimal::ONE);

    /// Create a fraction, clamping to [0, 1].
    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value.clamp(Decimal::ZERO, Decimal::ONE))
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Decimal> for Fraction {
    fn from(d: Decimal) -> Self {
        Self::new(d)
    }
}

/// Format a quote-currency amount at exactly two decimal places.
///
/// Rounds toward zero: the amount field is seeded from
/// `fraction * balance`, and rounding up here would overshoot the
/// balance at the 100% position and fail validation on untouched input.
pub fn format_quote(value: Decimal) -> String {
    let mut v = value.round_dp_with_strategy(2, RoundingStrategy::ToZero);
    v.rescale(2);
    v.to_string()
}

/// Format a base-asset quantity at exactly six decimal places,
/// matching the precision shown in the sell confirmation prompt.
pub fn format_quantity(value: Decimal) -> String {
    let mut v = value.round_dp_with_strategy(6, RoundingStrategy::ToZero);
    v.rescale(6);
    v.to_string()
}

/// Parse a user-entered amount string.
///
/// Returns `None` for empty, non-numeric, or negative input. A `None`
/// here means the slider must not be touched (garbage does not
/// propagate back into the sync state).
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let parsed = Decimal::from_str(text.trim()).ok()?;
    if parsed.is_sign_negative() {
        return None;
    }
    Some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fraction_clamps() {
        assert_eq!(Fraction::new(dec!(1.5)), Fraction::ONE);
        assert_eq!(Fraction::new(dec!(-0.2)), Fraction::ZERO);
        assert_eq!(Fraction::new(dec!(0.25)).inner(), dec!(0.25));
    }

    #[test]
    fn test_format_quote_pads_and_truncates() {
        assert_eq!(format_quote(dec!(250)), "250.00");
        assert_eq!(format_quote(dec!(61.7283945)), "61.72");
        assert_eq!(format_quote(dec!(0)), "0.00");
    }

    #[test]
    fn test_format_quote_never_rounds_up() {
        // 100% of balance must never format above the balance itself.
        assert_eq!(format_quote(dec!(99.999)), "99.99");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(dec!(5)), "5.000000");
        assert_eq!(format_quantity(dec!(0.123456789)), "0.123456");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("250.00"), Some(dec!(250)));
        assert_eq!(parse_amount(" 1.5 "), Some(dec!(1.5)));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("-5"), None);
    }
}
