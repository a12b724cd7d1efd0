//! Two-way binding between the percentage slider and the amount field.
//!
//! Each user edit propagates in exactly one direction: a slider write
//! reformats the amount text, a text write re-derives the slider. The
//! edited representation is never written back, so there is no
//! feedback loop to oscillate or fight the user's cursor.

use desk_core::{format_quote, parse_amount, Fraction, TradeContext};
use rust_decimal::Decimal;

/// Mutable per-dialog input state.
///
/// Invariant at rest: `amount_text` parses to
/// `slider_fraction * quote_balance` (2 dp, rounded toward zero), and
/// `quantity = parse(amount_text) / reference_price` when the price is
/// positive, else zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncState {
    slider_fraction: Fraction,
    amount_text: String,
    quantity: Decimal,
}

impl SyncState {
    /// Opening state for a dialog: sells start at 100% of the position,
    /// buys start at 0%.
    pub fn opening(ctx: &TradeContext) -> Self {
        let fraction = match ctx.side {
            desk_core::Side::Sell => Fraction::ONE,
            desk_core::Side::Buy => Fraction::ZERO,
        };
        let mut state = Self {
            slider_fraction: fraction,
            amount_text: String::new(),
            quantity: Decimal::ZERO,
        };
        state.apply_slider(ctx, fraction);
        state
    }

    /// Slider moved: reformat the amount text and re-derive quantity.
    /// The slider itself is not re-derived.
    pub fn apply_slider(&mut self, ctx: &TradeContext, fraction: Fraction) {
        self.slider_fraction = fraction;
        self.amount_text = format_quote(fraction.inner() * ctx.quote_balance);
        self.recompute_quantity(ctx);
    }

    /// Amount text edited: keep the text verbatim and move the slider
    /// only when the text parses to a usable amount. Garbage input must
    /// not propagate back to the slider.
    pub fn apply_amount_text(&mut self, ctx: &TradeContext, text: &str) {
        self.amount_text = text.to_string();
        if let Some(amount) = parse_amount(text) {
            if ctx.quote_balance > Decimal::ZERO {
                self.slider_fraction = Fraction::new(amount / ctx.quote_balance);
            }
        }
        self.recompute_quantity(ctx);
    }

    fn recompute_quantity(&mut self, ctx: &TradeContext) {
        self.quantity = match parse_amount(&self.amount_text) {
            Some(amount) if ctx.reference_price > Decimal::ZERO => amount / ctx.reference_price,
            _ => Decimal::ZERO,
        };
    }

    #[inline]
    pub fn slider_fraction(&self) -> Fraction {
        self.slider_fraction
    }

    #[inline]
    pub fn amount_text(&self) -> &str {
        &self.amount_text
    }

    /// Derived base asset quantity.
    #[inline]
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_core::Exchange;
    use rust_decimal_macros::dec;

    fn sell_ctx() -> TradeContext {
        // 5 BTC at 50 quote each: quote_balance 250.00
        TradeContext::sell(Exchange::Binance, "BTC", dec!(50), dec!(5)).unwrap()
    }

    fn buy_ctx() -> TradeContext {
        TradeContext::buy(Exchange::Binance, "BTC", dec!(50), dec!(250), false).unwrap()
    }

    #[test]
    fn test_sell_opens_at_full_balance() {
        let ctx = sell_ctx();
        let state = SyncState::opening(&ctx);
        assert_eq!(state.slider_fraction(), Fraction::ONE);
        assert_eq!(state.amount_text(), "250.00");
        assert_eq!(state.quantity(), dec!(5));
    }

    #[test]
    fn test_buy_opens_at_zero() {
        let ctx = buy_ctx();
        let state = SyncState::opening(&ctx);
        assert_eq!(state.slider_fraction(), Fraction::ZERO);
        assert_eq!(state.amount_text(), "0.00");
        assert_eq!(state.quantity(), Decimal::ZERO);
    }

    #[test]
    fn test_slider_to_text_invariant() {
        let ctx = sell_ctx();
        let mut state = SyncState::opening(&ctx);

        for fraction in [dec!(0), dec!(0.25), dec!(0.33), dec!(0.5), dec!(1)] {
            state.apply_slider(&ctx, Fraction::new(fraction));
            let parsed = parse_amount(state.amount_text()).unwrap();
            let exact = fraction * ctx.quote_balance;
            // 2 dp formatting keeps the text within 0.01 of the exact value.
            assert!((parsed - exact).abs() <= dec!(0.01), "fraction {fraction}");
        }
    }

    #[test]
    fn test_quantity_invariant() {
        let ctx = sell_ctx();
        let mut state = SyncState::opening(&ctx);

        state.apply_amount_text(&ctx, "125.00");
        assert_eq!(state.quantity(), dec!(125) / dec!(50));
        assert_eq!(state.slider_fraction(), Fraction::new(dec!(0.5)));
    }

    #[test]
    fn test_text_edit_moves_slider_once() {
        let ctx = sell_ctx();
        let mut state = SyncState::opening(&ctx);

        state.apply_amount_text(&ctx, "125.00");
        // The slider landed on the derived fraction and the text was
        // left exactly as typed: no write-back occurred.
        assert_eq!(state.amount_text(), "125.00");
        assert_eq!(state.slider_fraction(), Fraction::new(dec!(0.5)));
    }

    #[test]
    fn test_garbage_text_leaves_slider_untouched() {
        let ctx = sell_ctx();
        let mut state = SyncState::opening(&ctx);
        state.apply_slider(&ctx, Fraction::new(dec!(0.5)));

        state.apply_amount_text(&ctx, "abc");
        assert_eq!(state.slider_fraction(), Fraction::new(dec!(0.5)));
        assert_eq!(state.amount_text(), "abc");
        assert_eq!(state.quantity(), Decimal::ZERO);
    }

    #[test]
    fn test_zero_balance_leaves_slider_untouched() {
        let ctx = TradeContext::buy(Exchange::Mexc, "SOL", dec!(100), dec!(0), true).unwrap();
        let mut state = SyncState::opening(&ctx);

        state.apply_amount_text(&ctx, "10.00");
        assert_eq!(state.slider_fraction(), Fraction::ZERO);
    }

    #[test]
    fn test_zero_price_derives_zero_quantity() {
        let ctx = TradeContext::buy(Exchange::Mexc, "SOL", dec!(0), dec!(100), true).unwrap();
        let mut state = SyncState::opening(&ctx);

        state.apply_amount_text(&ctx, "10.00");
        assert_eq!(state.quantity(), Decimal::ZERO);
    }

    #[test]
    fn test_overshooting_text_clamps_slider() {
        let ctx = sell_ctx();
        let mut state = SyncState::opening(&ctx);

        state.apply_amount_text(&ctx, "9999.00");
        assert_eq!(state.slider_fraction(), Fraction::ONE);
        // Text stays as typed; validation is what rejects it.
        assert_eq!(state.amount_text(), "9999.00");
    }
}
