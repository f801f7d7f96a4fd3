//! CancellationCoordinator - reverses a ticket's charge, then deletes the ticket.

use std::sync::Arc;

use crate::domain::foundation::{TicketId, UserId};
use crate::domain::ticketing::{Payment, Ticket, TicketingError};
use crate::ports::{AuthorizationHandle, Ledger, PaymentAuthority, ReversalOutcome};

/// Command to cancel one of the caller's tickets.
#[derive(Debug, Clone)]
pub struct CancelTicketCommand {
    pub user_id: UserId,
    pub ticket_id: TicketId,
}

/// Result of a successful cancellation.
#[derive(Debug, Clone)]
pub struct CancelTicketResult {
    /// The ticket as it was before deletion.
    pub ticket: Ticket,
    /// The payment whose charge was reversed. The row itself is kept.
    pub payment: Payment,
    /// Authority's identifier for the reversal.
    pub reversal_id: String,
}

/// Coordinator for ticket cancellations.
///
/// Fails closed: the ticket is only deleted after the authority confirms the
/// reversal. A refused reversal leaves the ledger exactly as it was, so the
/// same cancellation can be retried.
pub struct CancellationCoordinator {
    authority: Arc<dyn PaymentAuthority>,
    ledger: Arc<dyn Ledger>,
}

impl CancellationCoordinator {
    pub fn new(authority: Arc<dyn PaymentAuthority>, ledger: Arc<dyn Ledger>) -> Self {
        Self { authority, ledger }
    }

    pub async fn cancel(
        &self,
        cmd: CancelTicketCommand,
    ) -> Result<CancelTicketResult, TicketingError> {
        // 1. Find the ticket; someone else's ticket looks the same as no ticket
        let ticket = self
            .ledger
            .find_ticket_owned_by(cmd.ticket_id, cmd.user_id)
            .await?
            .ok_or(TicketingError::TicketNotFound(cmd.ticket_id))?;

        // 2. Find the payment it was bought with
        let payment = self
            .ledger
            .find_payment(ticket.payment_id)
            .await?
            .ok_or_else(|| {
                tracing::error!(
                    user_id = %cmd.user_id,
                    ticket_id = %ticket.id,
                    payment_id = %ticket.payment_id,
                    "ticket references a missing payment"
                );
                TicketingError::storage(format!(
                    "payment {} for ticket {} not found",
                    ticket.payment_id, ticket.id
                ))
            })?;

        // 3. Reverse the charge
        let reversal_id = match self
            .authority
            .reverse(&AuthorizationHandle::from(&payment))
            .await
        {
            ReversalOutcome::Reversed { reversal_id } => reversal_id,
            ReversalOutcome::Failed { reason } => {
                tracing::warn!(
                    user_id = %cmd.user_id,
                    ticket_id = %ticket.id,
                    payment_id = %payment.id,
                    authorization_id = %payment.authorization_id,
                    reason = %reason,
                    "refund failed; ticket left active"
                );
                return Err(TicketingError::refund_failed(reason));
            }
        };

        // 4. Only now drop the ticket
        let deleted = self.ledger.delete_ticket(ticket.id).await.map_err(|e| {
            tracing::error!(
                user_id = %cmd.user_id,
                ticket_id = %ticket.id,
                payment_id = %payment.id,
                reversal_id = %reversal_id,
                error = %e,
                "charge reversed but ticket delete failed; ticket still active"
            );
            TicketingError::from(e)
        })?;

        if !deleted {
            // A concurrent cancellation got there first; the end state is the same.
            tracing::warn!(ticket_id = %ticket.id, "ticket already gone after reversal");
        }

        tracing::info!(
            user_id = %cmd.user_id,
            ticket_id = %ticket.id,
            payment_id = %payment.id,
            reversal_id = %reversal_id,
            "ticket canceled and refunded"
        );

        Ok(CancelTicketResult {
            ticket,
            payment,
            reversal_id,
        })
    }
}
