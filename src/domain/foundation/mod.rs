//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, auth types and error types that
//! form the vocabulary of the ticketing domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{EventId, PaymentId, TicketId, UserId};
pub use timestamp::Timestamp;
