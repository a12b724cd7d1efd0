//! Error types for desk-ticket.

use thiserror::Error;

/// Errors opening a ticket. Submission failures are not errors; they
/// are `SubmitOutcome` variants that keep the dialog open.
#[derive(Debug, Error)]
pub enum TicketError {
    #[error("Context error: {0}")]
    Context(#[from] desk_core::CoreError),

    #[error("Oracle error: {0}")]
    Oracle(#[from] desk_gateway::OracleError),
}

pub type TicketResult<T> = Result<T, TicketError>;
