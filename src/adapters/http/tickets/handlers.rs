//! HTTP handlers for ticket endpoints.
//!
//! These handlers connect Axum routes to the ticketing coordinators. The
//! caller's identity always comes from the session token, never the path.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::ticketing::{
    CancelTicketCommand, CancellationCoordinator, ListUserTicketsHandler, ListUserTicketsQuery,
    PurchaseCoordinator, PurchaseTicketsCommand,
};
use crate::domain::foundation::{ErrorCode, EventId, TicketId};
use crate::domain::ticketing::{Amount, TicketingError};
use crate::ports::{Ledger, PaymentAuthority};

use super::body::JsonOrForm;
use super::dto::{
    CancelTicketResponse, ErrorResponse, PurchaseTicketsRequest, PurchaseTicketsResponse,
    TicketView, TicketsResponse, CANCEL_SUCCESS_MESSAGE, PURCHASE_SUCCESS_MESSAGE,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for ticket routes.
#[derive(Clone)]
pub struct TicketingAppState {
    pub payment_authority: Arc<dyn PaymentAuthority>,
    pub ledger: Arc<dyn Ledger>,
}

impl TicketingAppState {
    pub fn new(payment_authority: Arc<dyn PaymentAuthority>, ledger: Arc<dyn Ledger>) -> Self {
        Self {
            payment_authority,
            ledger,
        }
    }

    pub fn purchase_coordinator(&self) -> PurchaseCoordinator {
        PurchaseCoordinator::new(self.payment_authority.clone(), self.ledger.clone())
    }

    pub fn cancellation_coordinator(&self) -> CancellationCoordinator {
        CancellationCoordinator::new(self.payment_authority.clone(), self.ledger.clone())
    }

    pub fn list_tickets_handler(&self) -> ListUserTicketsHandler {
        ListUserTicketsHandler::new(self.ledger.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /event/:event_id/tickets - Buy tickets for an event
pub async fn purchase_tickets(
    State(state): State<TicketingAppState>,
    RequireAuth(user): RequireAuth,
    Path(event_id): Path<i64>,
    JsonOrForm(request): JsonOrForm<PurchaseTicketsRequest>,
) -> Result<impl IntoResponse, TicketingApiError> {
    let cmd = PurchaseTicketsCommand {
        user_id: user.id,
        event_id: EventId::from_i64(event_id),
        total_amount: Amount::from_minor_units(request.total_amount),
        quantity: request.quantity,
        currency: request.currency,
    };

    let result = state.purchase_coordinator().purchase(cmd).await?;

    Ok(Json(PurchaseTicketsResponse {
        message: PURCHASE_SUCCESS_MESSAGE.to_string(),
        ticket_id: result.ticket.id.as_i64(),
    }))
}

/// DELETE /event/tickets/:ticket_id - Cancel a ticket and refund it
pub async fn cancel_ticket(
    State(state): State<TicketingAppState>,
    RequireAuth(user): RequireAuth,
    Path(ticket_id): Path<i64>,
) -> Result<impl IntoResponse, TicketingApiError> {
    let cmd = CancelTicketCommand {
        user_id: user.id,
        ticket_id: TicketId::from_i64(ticket_id),
    };

    state.cancellation_coordinator().cancel(cmd).await?;

    Ok(Json(CancelTicketResponse {
        message: CANCEL_SUCCESS_MESSAGE.to_string(),
    }))
}

/// GET /event/tickets - List the caller's tickets
pub async fn list_tickets(
    State(state): State<TicketingAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, TicketingApiError> {
    let tickets = state
        .list_tickets_handler()
        .handle(ListUserTicketsQuery { user_id: user.id })
        .await?;

    Ok(Json(TicketsResponse {
        tickets: tickets.into_iter().map(TicketView::from).collect(),
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error that converts ticketing failures and body rejections to HTTP
/// responses.
#[derive(Debug)]
pub enum TicketingApiError {
    /// A coordinator or query failed.
    Ticketing(TicketingError),

    /// The request body could not be read as a ticketing request.
    InvalidBody { status: StatusCode, message: String },
}

impl TicketingApiError {
    /// Create an error for a rejected request body.
    pub fn invalid_body(status: StatusCode, message: impl Into<String>) -> Self {
        Self::InvalidBody {
            status,
            message: message.into(),
        }
    }
}

impl From<TicketingError> for TicketingApiError {
    fn from(err: TicketingError) -> Self {
        Self::Ticketing(err)
    }
}

impl IntoResponse for TicketingApiError {
    fn into_response(self) -> axum::response::Response {
        let err = match self {
            TicketingApiError::Ticketing(err) => err,
            TicketingApiError::InvalidBody { status, message } => {
                let body = ErrorResponse::new(ErrorCode::ValidationFailed.to_string(), message);
                return (status, Json(body)).into_response();
            }
        };

        let status = match &err {
            TicketingError::EventNotFound(_) | TicketingError::TicketNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            TicketingError::PaymentAuthorization { .. }
            | TicketingError::RefundFailed { .. }
            | TicketingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let error_code = err.code().to_string();
        // Ledger errors carry driver text; keep it in the logs only.
        let message = match &err {
            TicketingError::Storage(_) => "Internal Server Error".to_string(),
            other => other.message(),
        };

        let body = if err.is_retryable() {
            ErrorResponse::with_details(
                error_code,
                message,
                serde_json::json!({ "retryable": true }),
            )
        } else {
            ErrorResponse::new(error_code, message)
        };

        (status, Json(body)).into_response()
    }
}
