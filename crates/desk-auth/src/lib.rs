//! Biometric authorization gate for sell orders.
//!
//! Sell operations move value out of an exchange account irreversibly,
//! so confirmation is gated behind a possession/identity check. Buys
//! move funds within the user's own custody and skip the gate.

pub mod challenge;
pub mod gate;

pub use challenge::{
    BiometricAvailability, BiometricChallenge, ChallengeOutcome, ChallengePrompt, MockBiometric,
};
pub use gate::{AuthorizationGate, AuthorizationOutcome};
