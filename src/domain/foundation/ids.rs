//! Strongly-typed identifier value objects.
//!
//! Ledger rows are keyed by database-assigned serial integers, so every
//! identifier wraps an `i64`. Keeping them as distinct types stops a
//! `TicketId` from being passed where a `PaymentId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

macro_rules! serial_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an identifier, rejecting zero and negative values.
            pub fn new(id: i64) -> Result<Self, ValidationError> {
                if id <= 0 {
                    return Err(ValidationError::out_of_range($field, 1, i64::MAX, id));
                }
                Ok(Self(id))
            }

            /// Wraps a value read back from the ledger without validation.
            pub fn from_i64(id: i64) -> Self {
                Self(id)
            }

            /// Returns the inner integer.
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let id = s.trim().parse::<i64>().map_err(|e| {
                    ValidationError::invalid_format($field, e.to_string())
                })?;
                Self::new(id)
            }
        }
    };
}

serial_id!(
    /// Identifier of an account, as resolved by the auth middleware.
    UserId,
    "user_id"
);

serial_id!(
    /// Identifier of an event that tickets are sold for.
    EventId,
    "event_id"
);

serial_id!(
    /// Identifier of a payment row in the ledger.
    PaymentId,
    "payment_id"
);

serial_id!(
    /// Identifier of a ticket row in the ledger.
    TicketId,
    "ticket_id"
);
