//! Payment authority port for external charge authorization.
//!
//! Defines the contract for the service that authorizes and reverses charges
//! (e.g., Stripe payment intents). The ticketing core only ever holds the
//! authority's identifier for a charge; the charge itself lives remotely.
//!
//! # Design
//!
//! - **One call, one request**: every method performs exactly one outbound
//!   network operation and mutates no local state
//! - **Fail closed**: `reverse` reports failure as a value so callers cannot
//!   mistake an unreversed charge for a reversed one

use crate::domain::foundation::{EventId, UserId};
use crate::domain::ticketing::{Amount, Currency, Payment};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for the external payment authority.
#[async_trait]
pub trait PaymentAuthority: Send + Sync {
    /// Authorize a charge for `request.amount`.
    ///
    /// Uses the configured default currency when the request has none.
    /// Any error is fatal to the enclosing purchase.
    async fn authorize(
        &self,
        request: AuthorizeChargeRequest,
    ) -> Result<AuthorizationHandle, PaymentError>;

    /// Reverse a previously authorized charge.
    ///
    /// Never errors: transport and provider failures come back as
    /// `ReversalOutcome::Failed`.
    async fn reverse(&self, handle: &AuthorizationHandle) -> ReversalOutcome;
}

/// Request to authorize a charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizeChargeRequest {
    /// Amount in minor units, exactly as submitted by the caller.
    pub amount: Amount,

    /// Currency; `None` selects the authority's configured default.
    pub currency: Option<Currency>,

    /// Buyer, attached as metadata for reconciliation.
    pub user_id: UserId,

    /// Event being paid for, attached as metadata for reconciliation.
    pub event_id: EventId,
}

/// Reference to a charge held by the authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationHandle {
    /// Authority's identifier (a payment intent id for Stripe).
    pub id: String,

    /// Amount the authority accepted.
    pub amount: Amount,

    /// Currency the charge was created in.
    pub currency: Currency,
}

impl From<&Payment> for AuthorizationHandle {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.authorization_id.clone(),
            amount: payment.amount,
            currency: payment.currency.clone(),
        }
    }
}

/// Result of asking the authority to reverse a charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReversalOutcome {
    /// The charge was reversed.
    Reversed {
        /// Authority's identifier for the reversal.
        reversal_id: String,
    },

    /// The charge was not reversed; local records must stay as they are.
    Failed {
        /// Why the authority (or the transport) refused.
        reason: String,
    },
}

impl ReversalOutcome {
    /// Create a failed outcome.
    pub fn failed(reason: impl Into<String>) -> Self {
        ReversalOutcome::Failed {
            reason: reason.into(),
        }
    }

    /// Check whether the charge was reversed.
    pub fn is_reversed(&self) -> bool {
        matches!(self, ReversalOutcome::Reversed { .. })
    }
}

/// Errors from payment authority operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,

    /// Whether the operation can be retried.
    pub retryable: bool,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            retryable: code.is_retryable(),
        }
    }

    /// Create with provider code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Create a card declined error.
    pub fn card_declined(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::CardDeclined, message)
    }

    /// Create an invalid amount error.
    pub fn invalid_amount(amount: Amount) -> Self {
        Self::new(
            PaymentErrorCode::InvalidAmount,
            format!("Amount must be positive, got {}", amount),
        )
    }

    /// Create a provider API error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// API authentication failed.
    AuthenticationError,

    /// Card was declined.
    CardDeclined,

    /// Amount rejected before reaching the provider.
    InvalidAmount,

    /// Resource not found.
    NotFound,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Provider API error.
    ProviderError,

    /// Unknown error.
    Unknown,
}

impl PaymentErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PaymentErrorCode::NetworkError | PaymentErrorCode::RateLimitExceeded
        )
    }
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::CardDeclined => "card_declined",
            PaymentErrorCode::InvalidAmount => "invalid_amount",
            PaymentErrorCode::NotFound => "not_found",
            PaymentErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            PaymentErrorCode::ProviderError => "provider_error",
            PaymentErrorCode::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}
