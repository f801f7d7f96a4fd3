//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer sequences calls across ports. It owns no state of its own;
//! everything durable lives behind the `Ledger` port.

pub mod handlers;

pub use handlers::{
    CancelTicketCommand, CancelTicketResult, CancellationCoordinator, ListUserTicketsHandler,
    ListUserTicketsQuery, PurchaseCoordinator, PurchaseTicketsCommand, PurchaseTicketsResult,
};
