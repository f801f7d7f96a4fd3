//! Ledger port - persistent store of payments and tickets.
//!
//! Every method is a single, independent statement. Callers that perform
//! several writes (payment then ticket) get no atomicity across them.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventId, PaymentId, TicketId, UserId};
use crate::domain::ticketing::{Event, NewPayment, NewTicket, Payment, Ticket};

/// Repository port for ticketing records.
///
/// Errors are always `ErrorCode::DatabaseError` style `DomainError`s;
/// a missing row is `Ok(None)`, never an error.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Insert a payment row and return it with its assigned id.
    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, DomainError>;

    /// Insert a ticket row and return it with its assigned id.
    async fn insert_ticket(&self, ticket: NewTicket) -> Result<Ticket, DomainError>;

    /// Look up an event by id.
    async fn find_event(&self, id: EventId) -> Result<Option<Event>, DomainError>;

    /// Look up a ticket, but only if `user_id` owns it.
    async fn find_ticket_owned_by(
        &self,
        id: TicketId,
        user_id: UserId,
    ) -> Result<Option<Ticket>, DomainError>;

    /// Look up a payment by id.
    async fn find_payment(&self, id: PaymentId) -> Result<Option<Payment>, DomainError>;

    /// Delete a ticket row. Returns whether a row was removed.
    async fn delete_ticket(&self, id: TicketId) -> Result<bool, DomainError>;

    /// All tickets bought by a user, oldest first.
    async fn find_tickets_for_user(&self, user_id: UserId) -> Result<Vec<Ticket>, DomainError>;
}
