//! Stripe payment authority adapter.
//!
//! Implements the `PaymentAuthority` port on top of Stripe PaymentIntents:
//! - Authorizing a charge creates a payment intent
//! - Reversing a charge cancels that intent
//!
//! # Security
//!
//! The secret API key is held in a `secrecy::SecretString` and only exposed
//! when building the basic-auth header.

mod api_types;
mod mock_payment_authority;
mod stripe_adapter;

pub use api_types::{error_from_response, StripeApiError, StripeErrorEnvelope, StripePaymentIntent};
pub use mock_payment_authority::{MethodCall, MockPaymentAuthority};
pub use stripe_adapter::{StripeConfig, StripePaymentAuthority};
