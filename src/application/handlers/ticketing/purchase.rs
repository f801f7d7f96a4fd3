//! PurchaseCoordinator - authorizes a charge, then records payment and ticket.

use std::sync::Arc;

use crate::domain::foundation::{EventId, UserId};
use crate::domain::ticketing::{
    Amount, Currency, NewPayment, NewTicket, Payment, Ticket, TicketingError,
};
use crate::ports::{AuthorizeChargeRequest, Ledger, PaymentAuthority};

/// Command to buy tickets for an event.
///
/// `total_amount` and `quantity` are taken as the caller sent them and are
/// not checked against the event's ticket price.
#[derive(Debug, Clone)]
pub struct PurchaseTicketsCommand {
    pub user_id: UserId,
    pub event_id: EventId,
    pub total_amount: Amount,
    pub quantity: i32,
    /// `None` charges in the authority's default currency.
    pub currency: Option<Currency>,
}

/// Result of a successful purchase.
#[derive(Debug, Clone)]
pub struct PurchaseTicketsResult {
    pub ticket: Ticket,
    pub payment: Payment,
}

/// Coordinator for ticket purchases.
///
/// Steps run strictly in order and each ledger write commits on its own.
/// A failure after authorization is reported but not compensated.
pub struct PurchaseCoordinator {
    authority: Arc<dyn PaymentAuthority>,
    ledger: Arc<dyn Ledger>,
}

impl PurchaseCoordinator {
    pub fn new(authority: Arc<dyn PaymentAuthority>, ledger: Arc<dyn Ledger>) -> Self {
        Self { authority, ledger }
    }

    pub async fn purchase(
        &self,
        cmd: PurchaseTicketsCommand,
    ) -> Result<PurchaseTicketsResult, TicketingError> {
        // 1. The event must exist
        self.ledger
            .find_event(cmd.event_id)
            .await?
            .ok_or(TicketingError::EventNotFound(cmd.event_id))?;

        // 2. Authorize the charge; nothing has been written yet
        let authorization = self
            .authority
            .authorize(AuthorizeChargeRequest {
                amount: cmd.total_amount,
                currency: cmd.currency,
                user_id: cmd.user_id,
                event_id: cmd.event_id,
            })
            .await
            .map_err(|e| {
                tracing::warn!(
                    user_id = %cmd.user_id,
                    event_id = %cmd.event_id,
                    amount = %cmd.total_amount,
                    error = %e,
                    "payment authorization failed"
                );
                TicketingError::payment_authorization(e.message)
            })?;

        // 3. Record the payment
        let payment = self
            .ledger
            .insert_payment(NewPayment {
                user_id: cmd.user_id,
                event_id: cmd.event_id,
                amount: cmd.total_amount,
                currency: authorization.currency.clone(),
                authorization_id: authorization.id.clone(),
            })
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = %cmd.user_id,
                    event_id = %cmd.event_id,
                    amount = %cmd.total_amount,
                    authorization_id = %authorization.id,
                    error = %e,
                    "authorized charge without payment record"
                );
                TicketingError::from(e)
            })?;

        // 4. Record the ticket against that payment
        let ticket = self
            .ledger
            .insert_ticket(NewTicket {
                user_id: cmd.user_id,
                event_id: cmd.event_id,
                payment_id: payment.id,
                quantity: cmd.quantity,
            })
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = %cmd.user_id,
                    event_id = %cmd.event_id,
                    payment_id = %payment.id,
                    authorization_id = %authorization.id,
                    error = %e,
                    "orphaned payment: ticket insert failed after payment was recorded"
                );
                TicketingError::from(e)
            })?;

        tracing::info!(
            user_id = %cmd.user_id,
            event_id = %cmd.event_id,
            payment_id = %payment.id,
            ticket_id = %ticket.id,
            "tickets purchased"
        );

        Ok(PurchaseTicketsResult { ticket, payment })
    }
}
