//! Ticketing-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | EventNotFound | 404 |
//! | PaymentAuthorization | 500 |
//! | TicketNotFound | 404 |
//! | RefundFailed | 500 |
//! | Storage | 500 |
//!
//! The authority does not tell a decline apart from an outage in a way the
//! caller can act on, so both payment failures surface as server errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, EventId, TicketId};

/// Errors returned by the purchase and cancellation coordinators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketingError {
    /// The purchase targets an event that does not exist.
    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    /// The payment authority rejected or failed the charge.
    #[error("Payment processing failed: {reason}")]
    PaymentAuthorization { reason: String },

    /// The ticket does not exist or belongs to someone else.
    #[error("Ticket not found: {0}")]
    TicketNotFound(TicketId),

    /// The payment authority did not reverse the charge.
    #[error("Failed to process refund: {reason}")]
    RefundFailed { reason: String },

    /// A ledger read or write failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TicketingError {
    pub fn event_not_found(id: EventId) -> Self {
        TicketingError::EventNotFound(id)
    }

    pub fn payment_authorization(reason: impl Into<String>) -> Self {
        TicketingError::PaymentAuthorization {
            reason: reason.into(),
        }
    }

    pub fn ticket_not_found(id: TicketId) -> Self {
        TicketingError::TicketNotFound(id)
    }

    pub fn refund_failed(reason: impl Into<String>) -> Self {
        TicketingError::RefundFailed {
            reason: reason.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        TicketingError::Storage(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            TicketingError::EventNotFound(_) => ErrorCode::EventNotFound,
            TicketingError::PaymentAuthorization { .. } => ErrorCode::PaymentAuthorizationFailed,
            TicketingError::TicketNotFound(_) => ErrorCode::TicketNotFound,
            TicketingError::RefundFailed { .. } => ErrorCode::RefundFailed,
            TicketingError::Storage(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns true when repeating the same request may succeed.
    ///
    /// A failed refund leaves the ledger untouched, so the cancellation can
    /// simply be sent again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TicketingError::RefundFailed { .. } | TicketingError::Storage(_)
        )
    }
}

impl From<DomainError> for TicketingError {
    fn from(err: DomainError) -> Self {
        TicketingError::Storage(err.message)
    }
}
