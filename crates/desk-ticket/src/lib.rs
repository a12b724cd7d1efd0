//! Trade-input synchronization and submission engine.
//!
//! One `TradeTicket` backs one Buy/Sell dialog instance:
//! - `SyncState` keeps the percentage slider and the free-text amount
//!   field mutually consistent and derives the trade quantity
//! - `validate` checks balance/precision constraints before anything
//!   touches the network
//! - sells pass through the biometric `AuthorizationGate`
//! - submission runs under a bounded timeout and every failure is
//!   classified before it reaches the user
//!
//! Nothing here is fatal: every failure path returns control to the
//! user with the dialog still open and inputs intact.

pub mod config;
pub mod error;
pub mod sync;
pub mod ticket;
pub mod validate;

pub use config::TicketConfig;
pub use error::{TicketError, TicketResult};
pub use sync::SyncState;
pub use ticket::{SubmitOutcome, TicketPhase, TradeTicket};
pub use validate::{validate, ValidOrder, ValidationError};
