//! Ledger records: events, payments and tickets.

use serde::Serialize;

use super::{Amount, Currency};
use crate::domain::foundation::{EventId, PaymentId, TicketId, Timestamp, UserId};

/// An event tickets can be bought for.
///
/// Owned by the event-management side of the system. Purchases only check
/// that it exists; `ticket_price` is informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub ticket_price: Amount,
    pub is_public: bool,
    pub creator_id: UserId,
}

/// A recorded, authorized charge.
///
/// Written once per successful authorization and never deleted, so the
/// payments table doubles as an audit log of every charge taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payment {
    pub id: PaymentId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub amount: Amount,
    pub currency: Currency,
    /// The authority's identifier for the charge, used to reverse it.
    pub authorization_id: String,
    pub created_at: Timestamp,
}

/// Values for a payment row about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub user_id: UserId,
    pub event_id: EventId,
    pub amount: Amount,
    pub currency: Currency,
    pub authorization_id: String,
}

/// A user's claim on an event, backed by exactly one payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub id: TicketId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub payment_id: PaymentId,
    pub quantity: i32,
    pub created_at: Timestamp,
}

impl Ticket {
    /// Ownership check used to scope cancellation to the buyer.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Values for a ticket row about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub user_id: UserId,
    pub event_id: EventId,
    pub payment_id: PaymentId,
    pub quantity: i32,
}
