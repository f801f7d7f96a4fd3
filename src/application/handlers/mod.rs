//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod ticketing;

pub use ticketing::{
    CancelTicketCommand, CancelTicketResult, CancellationCoordinator, ListUserTicketsHandler,
    ListUserTicketsQuery, PurchaseCoordinator, PurchaseTicketsCommand, PurchaseTicketsResult,
};
