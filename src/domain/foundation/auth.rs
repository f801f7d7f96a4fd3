//! Authentication domain types.
//!
//! The core never authenticates anyone itself. HTTP middleware validates the
//! caller's token through the `SessionValidator` port and hands the resulting
//! `AuthenticatedUser` to the ticketing handlers, which trust its `id`.

use super::UserId;
use thiserror::Error;

/// A caller whose token has been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The account identifier carried in the token claims.
    pub id: UserId,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId) -> Self {
        Self { id }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is malformed or has an invalid signature.
    #[error("Invalid token")]
    InvalidToken,

    /// The token signature is valid but it has expired.
    #[error("Token expired")]
    TokenExpired,
}
