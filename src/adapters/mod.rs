//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `stripe` - Payment authority (Stripe PaymentIntents) and its mock
//! - `postgres` - Ledger on PostgreSQL
//! - `memory` - In-memory ledger for tests and local runs
//! - `auth` - Session token validation
//! - `http` - axum REST API

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod stripe;

pub use auth::{JwtSessionValidator, MockSessionValidator};
pub use memory::InMemoryLedger;
pub use postgres::PostgresLedger;
pub use stripe::{MockPaymentAuthority, StripeConfig, StripePaymentAuthority};
