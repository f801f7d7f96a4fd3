//! Shared fixtures for coordinator tests.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tracing::subscriber::DefaultGuard;

use crate::adapters::memory::InMemoryLedger;
use crate::domain::foundation::{DomainError, EventId, PaymentId, TicketId, UserId};
use crate::domain::ticketing::{Amount, Event, NewPayment, NewTicket, Payment, Ticket};
use crate::ports::Ledger;

pub fn event(id: i64) -> Event {
    Event {
        id: EventId::from_i64(id),
        name: format!("Event {}", id),
        ticket_price: Amount::from_minor_units(250),
        is_public: true,
        creator_id: UserId::from_i64(1),
    }
}

/// Wraps an `InMemoryLedger` and fails selected operations.
#[derive(Default)]
pub struct FlakyLedger {
    inner: InMemoryLedger,
    fail_find_event: bool,
    fail_insert_payment: bool,
    fail_insert_ticket: bool,
    fail_find_ticket: bool,
    fail_delete_ticket: bool,
    hide_payments: bool,
}

impl FlakyLedger {
    pub fn new(inner: InMemoryLedger) -> Self {
        Self {
            inner,
            ..Default::default()
        }
    }

    pub fn failing_find_event(mut self) -> Self {
        self.fail_find_event = true;
        self
    }

    pub fn failing_insert_payment(mut self) -> Self {
        self.fail_insert_payment = true;
        self
    }

    pub fn failing_insert_ticket(mut self) -> Self {
        self.fail_insert_ticket = true;
        self
    }

    pub fn failing_find_ticket(mut self) -> Self {
        self.fail_find_ticket = true;
        self
    }

    pub fn failing_delete_ticket(mut self) -> Self {
        self.fail_delete_ticket = true;
        self
    }

    /// `find_payment` answers `None` for every id.
    pub fn without_payments(mut self) -> Self {
        self.hide_payments = true;
        self
    }

    fn check(flag: bool, op: &str) -> Result<(), DomainError> {
        if flag {
            Err(DomainError::database(format!("{} failed: connection reset", op)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Ledger for FlakyLedger {
    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, DomainError> {
        Self::check(self.fail_insert_payment, "insert_payment")?;
        self.inner.insert_payment(payment).await
    }

    async fn insert_ticket(&self, ticket: NewTicket) -> Result<Ticket, DomainError> {
        Self::check(self.fail_insert_ticket, "insert_ticket")?;
        self.inner.insert_ticket(ticket).await
    }

    async fn find_event(&self, id: EventId) -> Result<Option<Event>, DomainError> {
        Self::check(self.fail_find_event, "find_event")?;
        self.inner.find_event(id).await
    }

    async fn find_ticket_owned_by(
        &self,
        id: TicketId,
        user_id: UserId,
    ) -> Result<Option<Ticket>, DomainError> {
        Self::check(self.fail_find_ticket, "find_ticket_owned_by")?;
        self.inner.find_ticket_owned_by(id, user_id).await
    }

    async fn find_payment(&self, id: PaymentId) -> Result<Option<Payment>, DomainError> {
        if self.hide_payments {
            return Ok(None);
        }
        self.inner.find_payment(id).await
    }

    async fn delete_ticket(&self, id: TicketId) -> Result<bool, DomainError> {
        Self::check(self.fail_delete_ticket, "delete_ticket")?;
        self.inner.delete_ticket(id).await
    }

    async fn find_tickets_for_user(&self, user_id: UserId) -> Result<Vec<Ticket>, DomainError> {
        Self::check(self.fail_find_ticket, "find_tickets_for_user")?;
        self.inner.find_tickets_for_user(user_id).await
    }
}

/// Collects JSON-formatted tracing events emitted on the current thread.
///
/// Only meaningful under the single-threaded `#[tokio::test]` runtime,
/// where every await of the test stays on one thread.
#[derive(Clone, Default)]
pub struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    /// Route events to this buffer until the guard drops.
    pub fn install(&self) -> DefaultGuard {
        let logs = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || logs.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Every captured event.
    pub fn events(&self) -> Vec<serde_json::Value> {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer)
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    /// Fields of the ERROR events, message included.
    pub fn errors(&self) -> Vec<serde_json::Value> {
        self.events()
            .into_iter()
            .filter(|event| event["level"] == "ERROR")
            .map(|event| event["fields"].clone())
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
