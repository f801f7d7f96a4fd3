//! Ticketing handlers: the purchase and cancellation sagas plus the
//! caller's ticket listing.

mod cancel;
mod list_user_tickets;
mod purchase;

#[cfg(test)]
mod test_support;

pub use cancel::{CancelTicketCommand, CancelTicketResult, CancellationCoordinator};
pub use list_user_tickets::{ListUserTicketsHandler, ListUserTicketsQuery};
pub use purchase::{PurchaseCoordinator, PurchaseTicketsCommand, PurchaseTicketsResult};
