//! In-Memory Ledger Adapter
//!
//! Keeps events, payments and tickets in process memory with serial ids,
//! mirroring the PostgreSQL tables. Useful for testing and local runs.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, EventId, PaymentId, TicketId, Timestamp, UserId};
use crate::domain::ticketing::{Event, NewPayment, NewTicket, Payment, Ticket};
use crate::ports::Ledger;

#[derive(Debug, Default)]
struct LedgerState {
    events: HashMap<EventId, Event>,
    payments: BTreeMap<PaymentId, Payment>,
    tickets: BTreeMap<TicketId, Ticket>,
    last_payment_id: i64,
    last_ticket_id: i64,
}

/// In-memory implementation of the `Ledger` port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    state: Arc<RwLock<LedgerState>>,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event so purchases can find it.
    pub async fn add_event(&self, event: Event) {
        self.state.write().await.events.insert(event.id, event);
    }

    /// Snapshot of every payment row, ordered by id.
    pub async fn payments(&self) -> Vec<Payment> {
        self.state.read().await.payments.values().cloned().collect()
    }

    /// Snapshot of every ticket row, ordered by id.
    pub async fn tickets(&self) -> Vec<Ticket> {
        self.state.read().await.tickets.values().cloned().collect()
    }

    /// Number of payment rows.
    pub async fn payment_count(&self) -> usize {
        self.state.read().await.payments.len()
    }

    /// Number of ticket rows.
    pub async fn ticket_count(&self) -> usize {
        self.state.read().await.tickets.len()
    }
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, DomainError> {
        let mut state = self.state.write().await;
        state.last_payment_id += 1;
        let id = PaymentId::from_i64(state.last_payment_id);

        let row = Payment {
            id,
            user_id: payment.user_id,
            event_id: payment.event_id,
            amount: payment.amount,
            currency: payment.currency,
            authorization_id: payment.authorization_id,
            created_at: Timestamp::now(),
        };
        state.payments.insert(id, row.clone());
        Ok(row)
    }

    async fn insert_ticket(&self, ticket: NewTicket) -> Result<Ticket, DomainError> {
        let mut state = self.state.write().await;

        // Same guarantee the tickets.payment_id foreign key gives in Postgres.
        if !state.payments.contains_key(&ticket.payment_id) {
            return Err(DomainError::database(format!(
                "Failed to save ticket: payment {} does not exist",
                ticket.payment_id
            )));
        }

        state.last_ticket_id += 1;
        let id = TicketId::from_i64(state.last_ticket_id);

        let row = Ticket {
            id,
            user_id: ticket.user_id,
            event_id: ticket.event_id,
            payment_id: ticket.payment_id,
            quantity: ticket.quantity,
            created_at: Timestamp::now(),
        };
        state.tickets.insert(id, row.clone());
        Ok(row)
    }

    async fn find_event(&self, id: EventId) -> Result<Option<Event>, DomainError> {
        Ok(self.state.read().await.events.get(&id).cloned())
    }

    async fn find_ticket_owned_by(
        &self,
        id: TicketId,
        user_id: UserId,
    ) -> Result<Option<Ticket>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .tickets
            .get(&id)
            .filter(|t| t.is_owned_by(user_id))
            .cloned())
    }

    async fn find_payment(&self, id: PaymentId) -> Result<Option<Payment>, DomainError> {
        Ok(self.state.read().await.payments.get(&id).cloned())
    }

    async fn delete_ticket(&self, id: TicketId) -> Result<bool, DomainError> {
        Ok(self.state.write().await.tickets.remove(&id).is_some())
    }

    async fn find_tickets_for_user(&self, user_id: UserId) -> Result<Vec<Ticket>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .tickets
            .values()
            .filter(|t| t.is_owned_by(user_id))
            .cloned()
            .collect())
    }
}
