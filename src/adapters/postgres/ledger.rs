//! PostgreSQL implementation of the Ledger port.
//!
//! Each method issues exactly one statement against the pool. Nothing here
//! opens a transaction: purchase and cancellation steps are committed one at
//! a time by the coordinators.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, EventId, PaymentId, TicketId, Timestamp, UserId};
use crate::domain::ticketing::{Amount, Currency, Event, NewPayment, NewTicket, Payment, Ticket};
use crate::ports::Ledger;

/// PostgreSQL implementation of the Ledger port.
pub struct PostgresLedger {
    pool: PgPool,
}

impl PostgresLedger {
    /// Creates a new ledger over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: i64,
    name: String,
    ticket_price: i64,
    is_public: bool,
    creator_id: i64,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: EventId::from_i64(row.id),
            name: row.name,
            ticket_price: Amount::from_minor_units(row.ticket_price),
            is_public: row.is_public,
            creator_id: UserId::from_i64(row.creator_id),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: i64,
    user_id: i64,
    event_id: i64,
    amount: i64,
    currency: String,
    authorization_id: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let currency = Currency::new(row.currency).map_err(|e| {
            DomainError::database(format!("Invalid currency on payment {}: {}", row.id, e))
        })?;

        Ok(Payment {
            id: PaymentId::from_i64(row.id),
            user_id: UserId::from_i64(row.user_id),
            event_id: EventId::from_i64(row.event_id),
            amount: Amount::from_minor_units(row.amount),
            currency,
            authorization_id: row.authorization_id,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TicketRow {
    id: i64,
    user_id: i64,
    event_id: i64,
    payment_id: i64,
    quantity: i32,
    created_at: DateTime<Utc>,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Ticket {
            id: TicketId::from_i64(row.id),
            user_id: UserId::from_i64(row.user_id),
            event_id: EventId::from_i64(row.event_id),
            payment_id: PaymentId::from_i64(row.payment_id),
            quantity: row.quantity,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[async_trait]
impl Ledger for PostgresLedger {
    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, DomainError> {
        let row: PaymentRow = sqlx::query_as(
            r#"
            INSERT INTO payments (user_id, event_id, amount, currency, authorization_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, event_id, amount, currency, authorization_id, created_at
            "#,
        )
        .bind(payment.user_id.as_i64())
        .bind(payment.event_id.as_i64())
        .bind(payment.amount.minor_units())
        .bind(payment.currency.as_str())
        .bind(&payment.authorization_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to save payment: {}", e)))?;

        row.try_into()
    }

    async fn insert_ticket(&self, ticket: NewTicket) -> Result<Ticket, DomainError> {
        let row: TicketRow = sqlx::query_as(
            r#"
            INSERT INTO tickets (user_id, event_id, payment_id, quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, event_id, payment_id, quantity, created_at
            "#,
        )
        .bind(ticket.user_id.as_i64())
        .bind(ticket.event_id.as_i64())
        .bind(ticket.payment_id.as_i64())
        .bind(ticket.quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to save ticket: {}", e)))?;

        Ok(row.into())
    }

    async fn find_event(&self, id: EventId) -> Result<Option<Event>, DomainError> {
        let row: Option<EventRow> = sqlx::query_as(
            r#"
            SELECT id, name, ticket_price, is_public, creator_id
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find event: {}", e)))?;

        Ok(row.map(Event::from))
    }

    async fn find_ticket_owned_by(
        &self,
        id: TicketId,
        user_id: UserId,
    ) -> Result<Option<Ticket>, DomainError> {
        let row: Option<TicketRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, event_id, payment_id, quantity, created_at
            FROM tickets
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_i64())
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find ticket: {}", e)))?;

        Ok(row.map(Ticket::from))
    }

    async fn find_payment(&self, id: PaymentId) -> Result<Option<Payment>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, event_id, amount, currency, authorization_id, created_at
            FROM payments
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find payment: {}", e)))?;

        row.map(Payment::try_from).transpose()
    }

    async fn delete_ticket(&self, id: TicketId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete ticket: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_tickets_for_user(&self, user_id: UserId) -> Result<Vec<Ticket>, DomainError> {
        let rows: Vec<TicketRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, event_id, payment_id, quantity, created_at
            FROM tickets
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list tickets: {}", e)))?;

        Ok(rows.into_iter().map(Ticket::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_row_converts_to_domain() {
        let row = PaymentRow {
            id: 4,
            user_id: 7,
            event_id: 3,
            amount: 500,
            currency: "inr".to_string(),
            authorization_id: "pi_123".to_string(),
            created_at: Utc::now(),
        };

        let payment = Payment::try_from(row).unwrap();

        assert_eq!(payment.id, PaymentId::from_i64(4));
        assert_eq!(payment.amount, Amount::from_minor_units(500));
        assert_eq!(payment.authorization_id, "pi_123");
    }

    #[test]
    fn payment_row_with_bad_currency_is_rejected() {
        let row = PaymentRow {
            id: 4,
            user_id: 7,
            event_id: 3,
            amount: 500,
            currency: "rupees".to_string(),
            authorization_id: "pi_123".to_string(),
            created_at: Utc::now(),
        };

        assert!(Payment::try_from(row).is_err());
    }

    #[test]
    fn ticket_row_converts_to_domain() {
        let row = TicketRow {
            id: 9,
            user_id: 7,
            event_id: 3,
            payment_id: 4,
            quantity: 2,
            created_at: Utc::now(),
        };

        let ticket = Ticket::from(row);

        assert_eq!(ticket.id, TicketId::from_i64(9));
        assert_eq!(ticket.payment_id, PaymentId::from_i64(4));
        assert_eq!(ticket.quantity, 2);
        assert!(ticket.is_owned_by(UserId::from_i64(7)));
    }

    #[test]
    fn event_row_converts_to_domain() {
        let row = EventRow {
            id: 3,
            name: "Launch".to_string(),
            ticket_price: 250,
            is_public: true,
            creator_id: 1,
        };

        let event = Event::from(row);

        assert_eq!(event.id, EventId::from_i64(3));
        assert_eq!(event.ticket_price, Amount::from_minor_units(250));
    }
}
