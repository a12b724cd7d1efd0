//! Biometric challenge collaborator contract.
//!
//! Models the platform's biometric prompt as an async call with three
//! observable outcomes. Dismissal is a first-class outcome, not an
//! exception: the dialog recovers from it the same way it recovers
//! from a hardware denial.

use desk_core::{format_quantity, BoxFuture};
use rust_decimal::Decimal;

/// What the platform capability probe reported.
///
/// Only `Available` allows a challenge to run; every other state makes
/// the calling gate fall back to direct submission (documented
/// behavior, so users without biometric hardware are not locked out).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiometricAvailability {
    /// Biometric or device-credential authentication is ready.
    Available,
    /// Device has no biometric hardware.
    NoHardware,
    /// Hardware exists but is currently unavailable.
    HardwareUnavailable,
    /// No biometric credentials enrolled.
    NoneEnrolled,
    /// Platform does not support the required authenticators.
    Unsupported,
    /// Probe could not determine the state.
    Unknown,
}

impl BiometricAvailability {
    /// Whether a challenge can actually be presented.
    pub fn can_challenge(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Context shown to the user inside the biometric prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengePrompt {
    pub title: String,
    pub subtitle: String,
}

impl ChallengePrompt {
    /// Prompt for a sell confirmation, naming the asset and the exact
    /// quantity about to leave the account.
    pub fn for_sell(asset: &str, quantity: Decimal) -> Self {
        Self {
            title: "Confirm Sale".to_string(),
            subtitle: format!("Authenticate to sell {} {}", format_quantity(quantity), asset),
        }
    }
}

/// Outcome of a single biometric challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeOutcome {
    /// User biometrically confirmed.
    Granted,
    /// Hardware/enrollment error or explicit failure, with a
    /// human-readable message (e.g. lockout after too many attempts).
    Denied(String),
    /// User dismissed the prompt.
    Cancelled,
}

/// Trait for the platform biometric prompt.
///
/// One `challenge` call per authorization attempt; the prompt itself
/// handles per-finger retries internally.
pub trait BiometricChallenge: Send + Sync {
    /// Probe the current capability state.
    fn availability(&self) -> BiometricAvailability;

    /// Present the prompt and wait for the user.
    fn challenge(&self, prompt: ChallengePrompt) -> BoxFuture<'_, ChallengeOutcome>;
}

/// Mock biometric collaborator for testing.
#[derive(Debug)]
pub struct MockBiometric {
    availability: parking_lot::Mutex<BiometricAvailability>,
    next_outcome: parking_lot::Mutex<ChallengeOutcome>,
    /// Recorded prompts for verification.
    prompts: parking_lot::Mutex<Vec<ChallengePrompt>>,
}

impl Default for MockBiometric {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBiometric {
    /// Create a mock that is available and grants everything.
    pub fn new() -> Self {
        Self {
            availability: parking_lot::Mutex::new(BiometricAvailability::Available),
            next_outcome: parking_lot::Mutex::new(ChallengeOutcome::Granted),
            prompts: parking_lot::Mutex::new(Vec::new()),
        }
    }

    pub fn set_availability(&self, availability: BiometricAvailability) {
        *self.availability.lock() = availability;
    }

    pub fn set_next_outcome(&self, outcome: ChallengeOutcome) {
        *self.next_outcome.lock() = outcome;
    }

    /// Get recorded prompts.
    pub fn prompts(&self) -> Vec<ChallengePrompt> {
        self.prompts.lock().clone()
    }
}

impl BiometricChallenge for MockBiometric {
    fn availability(&self) -> BiometricAvailability {
        *self.availability.lock()
    }

    fn challenge(&self, prompt: ChallengePrompt) -> BoxFuture<'_, ChallengeOutcome> {
        Box::pin(async move {
            self.prompts.lock().push(prompt);
            self.next_outcome.lock().clone()
        })
    }
}
