//! Axum router configuration for ticket endpoints.

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::adapters::http::middleware::{auth_middleware, AuthState};

use super::handlers::{cancel_ticket, list_tickets, purchase_tickets, TicketingAppState};

/// Create the ticket router, mounted under `/event`.
///
/// # Routes (all require a session token)
/// - `POST /:event_id/tickets` - Buy tickets for an event
/// - `GET /tickets` - List the caller's tickets
/// - `DELETE /tickets/:ticket_id` - Cancel a ticket and refund its charge
pub fn ticket_routes(auth: AuthState) -> Router<TicketingAppState> {
    Router::new()
        .route("/:event_id/tickets", post(purchase_tickets))
        .route("/tickets", get(list_tickets))
        .route("/tickets/:ticket_id", delete(cancel_ticket))
        .route_layer(middleware::from_fn_with_state(auth, auth_middleware))
}

/// Create the complete ticketing router with state applied.
///
/// # Example
///
/// ```ignore
/// let app = ticketing_router(TicketingAppState::new(authority, ledger), validator);
/// ```
pub fn ticketing_router(state: TicketingAppState, auth: AuthState) -> Router {
    Router::new()
        .nest("/event", ticket_routes(auth))
        .with_state(state)
}
