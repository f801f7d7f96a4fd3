//! Ticketing domain: the records kept in the ledger and the errors the
//! purchase and cancellation workflows can end in.

mod errors;
mod money;
mod records;

pub use errors::TicketingError;
pub use money::{Amount, Currency};
pub use records::{Event, NewPayment, NewTicket, Payment, Ticket};
