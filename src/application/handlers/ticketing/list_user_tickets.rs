//! ListUserTicketsHandler - Query handler for the caller's tickets.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::ticketing::{Ticket, TicketingError};
use crate::ports::Ledger;

/// Query for every ticket a user currently holds.
#[derive(Debug, Clone)]
pub struct ListUserTicketsQuery {
    pub user_id: UserId,
}

/// Handler for listing a user's tickets, oldest first.
pub struct ListUserTicketsHandler {
    ledger: Arc<dyn Ledger>,
}

impl ListUserTicketsHandler {
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self { ledger }
    }

    pub async fn handle(&self, query: ListUserTicketsQuery) -> Result<Vec<Ticket>, TicketingError> {
        Ok(self.ledger.find_tickets_for_user(query.user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::FlakyLedger;
    use super::*;
    use crate::adapters::memory::InMemoryLedger;
    use crate::domain::foundation::EventId;
    use crate::domain::ticketing::{Amount, Currency, NewPayment, NewTicket};

    async fn buy(ledger: &InMemoryLedger, user: i64) -> Ticket {
        let payment = ledger
            .insert_payment(NewPayment {
                user_id: UserId::from_i64(user),
                event_id: EventId::from_i64(3),
                amount: Amount::from_minor_units(500),
                currency: Currency::default(),
                authorization_id: format!("pi_{}", user),
            })
            .await
            .unwrap();
        ledger
            .insert_ticket(NewTicket {
                user_id: UserId::from_i64(user),
                event_id: EventId::from_i64(3),
                payment_id: payment.id,
                quantity: 1,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn lists_only_callers_tickets() {
        let ledger = InMemoryLedger::new();
        let first = buy(&ledger, 7).await;
        buy(&ledger, 8).await;
        let second = buy(&ledger, 7).await;
        let handler = ListUserTicketsHandler::new(Arc::new(ledger));

        let tickets = handler
            .handle(ListUserTicketsQuery {
                user_id: UserId::from_i64(7),
            })
            .await
            .unwrap();

        assert_eq!(tickets, vec![first, second]);
    }

    #[tokio::test]
    async fn empty_for_user_without_tickets() {
        let handler = ListUserTicketsHandler::new(Arc::new(InMemoryLedger::new()));

        let tickets = handler
            .handle(ListUserTicketsQuery {
                user_id: UserId::from_i64(7),
            })
            .await
            .unwrap();

        assert!(tickets.is_empty());
    }

    #[tokio::test]
    async fn storage_failure_propagates() {
        let ledger = FlakyLedger::new(InMemoryLedger::new()).failing_find_ticket();
        let handler = ListUserTicketsHandler::new(Arc::new(ledger));

        let err = handler
            .handle(ListUserTicketsQuery {
                user_id: UserId::from_i64(7),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, TicketingError::Storage(_)));
    }
}
