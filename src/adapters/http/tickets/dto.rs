//! Data Transfer Objects for ticket endpoints.
//!
//! Field names follow the existing client contract (`totalAmount`,
//! `ticketId`), hence the camelCase renames.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::ticketing::{Currency, Ticket};

pub const PURCHASE_SUCCESS_MESSAGE: &str = "Tickets purchased successfully";
pub const CANCEL_SUCCESS_MESSAGE: &str = "Ticket canceled and refund processed successfully";

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request body for `POST /event/:event_id/tickets`.
///
/// Sent as JSON or as a urlencoded form; numbers may arrive as strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseTicketsRequest {
    /// Charge amount in minor units, passed to the authority unmodified.
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub total_amount: i64,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub quantity: i32,
    /// Defaults to the configured currency.
    #[serde(default)]
    pub currency: Option<Currency>,
}

fn number_or_numeric_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient<N> {
        Number(N),
        Text(String),
    }

    match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Number(value) => Ok(value),
        Lenient::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseTicketsResponse {
    pub message: String,
    pub ticket_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelTicketResponse {
    pub message: String,
}

/// One ticket as returned by `GET /event/tickets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketView {
    pub id: i64,
    pub event_id: i64,
    pub payment_id: i64,
    pub quantity: i32,
    pub created_at: String,
}

impl From<Ticket> for TicketView {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id.as_i64(),
            event_id: ticket.event_id.as_i64(),
            payment_id: ticket.payment_id.as_i64(),
            quantity: ticket.quantity,
            created_at: ticket.created_at.as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketsResponse {
    pub tickets: Vec<TicketView>,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}
