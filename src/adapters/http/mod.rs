//! HTTP adapters - REST API for the ticketing core.
//!
//! - `tickets` - purchase, cancel and list endpoints
//! - `middleware` - session token authentication
//! - `router` - full application with trace, CORS and timeout layers

pub mod middleware;
pub mod router;
pub mod tickets;

pub use router::build_router;
pub use tickets::{ticketing_router, TicketingAppState};
