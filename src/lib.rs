//! Event Ticketing - ticket purchase and cancellation backend
//!
//! This crate ties an external payment authority (Stripe) to a local
//! PostgreSQL ledger of payments and tickets. Buying authorizes a charge and
//! then records a payment and a ticket; cancelling reverses the charge and
//! only then removes the ticket.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
