//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PaymentAuthority` - authorizes and reverses charges with the external authority
//! - `Ledger` - persistent payments/tickets store (and read access to events)
//! - `SessionValidator` - resolves an access token to a user

mod ledger;
mod payment_authority;
mod session_validator;

pub use ledger::Ledger;
pub use payment_authority::{
    AuthorizationHandle, AuthorizeChargeRequest, PaymentAuthority, PaymentError,
    PaymentErrorCode, ReversalOutcome,
};
pub use session_validator::SessionValidator;
