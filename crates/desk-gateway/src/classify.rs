//! Backend error classification.
//!
//! The trading backend forwards exchange-native error strings, and the
//! phrasing differs per venue (Binance/Bybit/MEXC). This table
//! normalizes the subset of errors a user can act on; everything else
//! passes through verbatim so diagnostic information is never hidden.

use tracing::debug;

/// Ordered rule table. First match wins.
const CLASSIFICATION_RULES: &[(&str, &str)] = &[
    (
        "insufficient balance",
        "Insufficient balance. Asset may have been sold already. Try refreshing.",
    ),
    (
        "too many decimals",
        "Invalid quantity precision. Please refresh and try again.",
    ),
    (
        "minimum",
        "Order size too small. Minimum order size not met.",
    ),
    (
        "min_notional",
        "Order size too small. Minimum order size not met.",
    ),
    (
        "not tradeable",
        "Asset not tradeable on this exchange.",
    ),
];

/// Map a raw backend error to a user-facing message.
///
/// Case-insensitive substring match against the rule table; an
/// unrecognized error is returned unmodified.
pub fn classify(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    for &(pattern, message) in CLASSIFICATION_RULES {
        if lowered.contains(pattern) {
            debug!(pattern, raw, "classified backend error");
            return message.to_string();
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_patterns() {
        assert_eq!(
            classify("Account has insufficient balance for requested action"),
            "Insufficient balance. Asset may have been sold already. Try refreshing."
        );
        assert_eq!(
            classify("Quantity has too many decimals"),
            "Invalid quantity precision. Please refresh and try again."
        );
        assert_eq!(
            classify("MIN_NOTIONAL not met"),
            "Order size too small. Minimum order size not met."
        );
        assert_eq!(
            classify("order below exchange minimum"),
            "Order size too small. Minimum order size not met."
        );
        assert_eq!(
            classify("Symbol not tradeable"),
            "Asset not tradeable on this exchange."
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            classify("INSUFFICIENT BALANCE"),
            "Insufficient balance. Asset may have been sold already. Try refreshing."
        );
    }

    #[test]
    fn test_first_match_wins() {
        // Matches both the insufficient-balance and minimum rules;
        // table order decides.
        assert_eq!(
            classify("Insufficient balance for minimum order"),
            "Insufficient balance. Asset may have been sold already. Try refreshing."
        );
    }

    #[test]
    fn test_unknown_passes_through() {
        assert_eq!(classify("E451: venue specific oddity"), "E451: venue specific oddity");
    }
}
