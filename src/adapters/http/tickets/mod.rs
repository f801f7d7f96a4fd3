//! Ticket HTTP adapter - purchase, cancel and list endpoints.

mod body;
pub mod dto;
mod handlers;
mod routes;

pub use body::JsonOrForm;
pub use dto::{
    CancelTicketResponse, ErrorResponse, PurchaseTicketsRequest, PurchaseTicketsResponse,
    TicketView, TicketsResponse,
};
pub use handlers::{TicketingApiError, TicketingAppState};
pub use routes::{ticket_routes, ticketing_router};
