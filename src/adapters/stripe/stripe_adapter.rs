//! Stripe payment authority adapter.
//!
//! Implements the `PaymentAuthority` port with Stripe PaymentIntents:
//! authorizing creates an intent, reversing cancels it.
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(api_key).with_default_currency(Currency::new("inr")?);
//! let authority = StripePaymentAuthority::new(config);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::ticketing::Currency;
use crate::ports::{
    AuthorizationHandle, AuthorizeChargeRequest, PaymentAuthority, PaymentError,
    PaymentErrorCode, ReversalOutcome,
};

use super::api_types::{error_from_response, StripePaymentIntent};

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Currency used when a charge request does not name one.
    default_currency: Currency,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            default_currency: Currency::default(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Set the currency applied to requests without one.
    pub fn with_default_currency(mut self, currency: Currency) -> Self {
        self.default_currency = currency;
        self
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// The currency applied to requests without one.
    pub fn default_currency(&self) -> &Currency {
        &self.default_currency
    }
}

/// Stripe payment authority adapter.
pub struct StripePaymentAuthority {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAuthority {
    /// Create a new Stripe adapter with the given configuration.
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Read a PaymentIntent out of a response, mapping failures.
    async fn read_intent(response: reqwest::Response) -> Result<StripePaymentIntent, PaymentError> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(error_from_response(status.as_u16(), &error_text));
        }

        response.json().await.map_err(|e| {
            PaymentError::new(
                PaymentErrorCode::ProviderError,
                format!("Failed to parse Stripe response: {}", e),
            )
        })
    }

    async fn cancel_intent(&self, intent_id: &str) -> Result<StripePaymentIntent, PaymentError> {
        let url = format!(
            "{}/v1/payment_intents/{}/cancel",
            self.config.api_base_url, intent_id
        );

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&[("cancellation_reason", "requested_by_customer")])
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        Self::read_intent(response).await
    }
}

#[async_trait]
impl PaymentAuthority for StripePaymentAuthority {
    async fn authorize(
        &self,
        request: AuthorizeChargeRequest,
    ) -> Result<AuthorizationHandle, PaymentError> {
        // Stripe would reject it anyway; skip the round trip.
        if !request.amount.is_positive() {
            return Err(PaymentError::invalid_amount(request.amount));
        }

        let currency = request
            .currency
            .unwrap_or_else(|| self.config.default_currency.clone());
        let url = format!("{}/v1/payment_intents", self.config.api_base_url);

        let params = [
            ("amount", request.amount.minor_units().to_string()),
            ("currency", currency.as_str().to_string()),
            ("metadata[user_id]", request.user_id.to_string()),
            ("metadata[event_id]", request.event_id.to_string()),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let intent = Self::read_intent(response).await.map_err(|e| {
            tracing::error!(
                error = %e,
                amount = request.amount.minor_units(),
                "Stripe create payment intent failed"
            );
            e
        })?;

        if !intent.matches_charge(request.amount, &currency) {
            tracing::error!(
                intent_id = %intent.id,
                requested_amount = request.amount.minor_units(),
                intent_amount = intent.amount,
                requested_currency = %currency,
                intent_currency = %intent.currency,
                "Stripe payment intent does not match the requested charge"
            );
            if let Err(e) = self.cancel_intent(&intent.id).await {
                tracing::warn!(intent_id = %intent.id, error = %e, "could not cancel mismatched payment intent");
            }
            return Err(PaymentError::provider(format!(
                "payment intent {} is for {} {}, expected {} {}",
                intent.id,
                intent.amount,
                intent.currency,
                request.amount.minor_units(),
                currency
            )));
        }

        Ok(AuthorizationHandle {
            id: intent.id,
            amount: request.amount,
            currency,
        })
    }

    async fn reverse(&self, handle: &AuthorizationHandle) -> ReversalOutcome {
        match self.cancel_intent(&handle.id).await {
            Ok(intent) if intent.is_canceled() => ReversalOutcome::Reversed {
                reversal_id: intent.id,
            },
            Ok(intent) => {
                tracing::warn!(
                    intent_id = %intent.id,
                    status = %intent.status,
                    "Stripe cancel returned an intent that is not canceled"
                );
                ReversalOutcome::failed(format!(
                    "payment intent {} is {} after cancel",
                    intent.id, intent.status
                ))
            }
            Err(e) => {
                tracing::warn!(intent_id = %handle.id, error = %e, "Stripe cancel payment intent failed");
                ReversalOutcome::failed(e.message)
            }
        }
    }
}
