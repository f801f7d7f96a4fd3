//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, auth, errors)
//! - `ticketing` - Events, payments, tickets and the workflow error taxonomy

pub mod foundation;
pub mod ticketing;
