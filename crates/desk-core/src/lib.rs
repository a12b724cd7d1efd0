//! Core domain types for the trade ticket engine.
//!
//! This crate provides fundamental types used throughout the client:
//! - `Side`, `Exchange`: trading enums
//! - `Fraction`: slider position clamped to [0, 1]
//! - `TradeContext`: immutable per-dialog snapshot of price and balances
//! - Decimal parsing/formatting helpers for amounts and quantities

pub mod context;
pub mod decimal;
pub mod error;
pub mod future;
pub mod trade;

pub use context::TradeContext;
pub use decimal::{format_quantity, format_quote, parse_amount, Fraction};
pub use error::{CoreError, Result};
pub use future::BoxFuture;
pub use trade::{Exchange, Side, TicketId};
