//! Stripe API wire types.
//!
//! Only the fields the adapter reads are modelled; Stripe sends many more and
//! serde ignores them.

use serde::Deserialize;

use crate::domain::ticketing::{Amount, Currency};
use crate::ports::{PaymentError, PaymentErrorCode};

/// A Stripe PaymentIntent as returned by create and cancel.
#[derive(Debug, Clone, Deserialize)]
pub struct StripePaymentIntent {
    /// Intent ID (pi_...).
    pub id: String,

    /// Amount in minor units.
    pub amount: i64,

    /// Lowercase currency code.
    pub currency: String,

    /// Lifecycle status (requires_payment_method, succeeded, canceled, ...).
    pub status: String,
}

impl StripePaymentIntent {
    /// True when the intent is for exactly this amount and currency.
    pub fn matches_charge(&self, amount: Amount, currency: &Currency) -> bool {
        self.amount == amount.minor_units() && self.currency.eq_ignore_ascii_case(currency.as_str())
    }

    /// True once Stripe has canceled the intent.
    pub fn is_canceled(&self) -> bool {
        self.status == "canceled"
    }
}

/// Error envelope Stripe returns on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorEnvelope {
    pub error: StripeApiError,
}

/// Body of a Stripe API error.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeApiError {
    /// Error category (card_error, invalid_request_error, api_error, ...).
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,

    /// Short machine-readable code (e.g. `payment_intent_unexpected_state`).
    #[serde(default)]
    pub code: Option<String>,

    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,

    /// Decline code for card errors.
    #[serde(default)]
    pub decline_code: Option<String>,
}

/// Convert a failed Stripe response into a `PaymentError`.
///
/// Falls back to the raw body when it is not a Stripe error envelope.
pub fn error_from_response(status: u16, body: &str) -> PaymentError {
    let parsed = serde_json::from_str::<StripeErrorEnvelope>(body).ok();

    let code = match status {
        401 => PaymentErrorCode::AuthenticationError,
        402 => PaymentErrorCode::CardDeclined,
        404 => PaymentErrorCode::NotFound,
        429 => PaymentErrorCode::RateLimitExceeded,
        _ if parsed
            .as_ref()
            .and_then(|e| e.error.error_type.as_deref())
            == Some("card_error") =>
        {
            PaymentErrorCode::CardDeclined
        }
        _ => PaymentErrorCode::ProviderError,
    };

    match parsed {
        Some(envelope) => {
            let message = envelope
                .error
                .message
                .unwrap_or_else(|| format!("Stripe API error (HTTP {})", status));
            let error = PaymentError::new(code, format!("Stripe API error: {}", message));
            match envelope.error.decline_code.or(envelope.error.code) {
                Some(provider_code) => error.with_provider_code(provider_code),
                None => error,
            }
        }
        None => PaymentError::new(code, format!("Stripe API error: {}", body)),
    }
}
