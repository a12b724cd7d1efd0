//! Authorization gate wrapping sell confirmation.

use std::sync::Arc;

use desk_core::{Side, TradeContext};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::challenge::{BiometricChallenge, ChallengeOutcome, ChallengePrompt};

/// Outcome of an authorization attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationOutcome {
    /// No gate applies (buys, or no biometric capability).
    NotRequired,
    /// User confirmed; submission may proceed.
    Granted,
    /// Challenge failed with a human-readable message.
    Denied(String),
    /// User dismissed the prompt.
    Cancelled,
}

impl AuthorizationOutcome {
    /// Whether submission may proceed.
    pub fn allows_submission(&self) -> bool {
        matches!(self, Self::NotRequired | Self::Granted)
    }
}

/// Gates sell submissions behind the biometric challenge.
///
/// Buys are never gated: they move funds within the user's own custody.
/// Sells move value out of the account irreversibly, so a single
/// accidental tap (or an unlocked but compromised device) must not be
/// enough to liquidate a position.
pub struct AuthorizationGate {
    challenge: Arc<dyn BiometricChallenge>,
}

impl AuthorizationGate {
    pub fn new(challenge: Arc<dyn BiometricChallenge>) -> Self {
        Self { challenge }
    }

    /// Run the gate for a validated order.
    ///
    /// `quantity` is the base asset quantity captured at validation
    /// time; it is shown verbatim in the prompt so the user confirms
    /// exactly what will be submitted.
    pub async fn authorize(&self, ctx: &TradeContext, quantity: Decimal) -> AuthorizationOutcome {
        if ctx.side == Side::Buy {
            debug!(ticket_id = %ctx.ticket_id, "buy order, authorization not required");
            return AuthorizationOutcome::NotRequired;
        }

        let availability = self.challenge.availability();
        if !availability.can_challenge() {
            // Documented fallback: a device without biometric capability
            // submits directly instead of locking the user out.
            warn!(
                ticket_id = %ctx.ticket_id,
                ?availability,
                "biometric challenge unavailable, falling back to direct submission"
            );
            return AuthorizationOutcome::NotRequired;
        }

        let prompt = ChallengePrompt::for_sell(&ctx.asset, quantity);
        match self.challenge.challenge(prompt).await {
            ChallengeOutcome::Granted => {
                info!(ticket_id = %ctx.ticket_id, asset = %ctx.asset, "sell authorized");
                AuthorizationOutcome::Granted
            }
            ChallengeOutcome::Denied(message) => {
                warn!(ticket_id = %ctx.ticket_id, %message, "sell authorization denied");
                AuthorizationOutcome::Denied(message)
            }
            ChallengeOutcome::Cancelled => {
                info!(ticket_id = %ctx.ticket_id, "sell authorization cancelled by user");
                AuthorizationOutcome::Cancelled
            }
        }
    }
}
