//! Trading backend collaborators for the trade ticket engine.
//!
//! The core has no network surface of its own; everything it needs from
//! the outside world comes through the traits in this crate:
//! - `PriceOracle`: current price for an asset/exchange pair
//! - `BalanceProvider`: tradable balance per side
//! - `OrderGateway`: order submission with two failure channels
//!
//! Raw backend error strings are normalized by `classify` before they
//! reach the user.

pub mod classify;
pub mod oracle;
pub mod orders;

pub use classify::classify;
pub use oracle::{
    BalanceProvider, OracleError, PriceOracle, StaticBalanceProvider, StaticPriceOracle,
};
pub use orders::{
    DynOrderGateway, GatewayError, MockOrderGateway, OrderAck, OrderAmount, OrderGateway,
    OrderRequest,
};
