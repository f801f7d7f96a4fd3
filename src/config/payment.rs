//! Payment authority configuration

use serde::Deserialize;

use crate::domain::ticketing::Currency;

use super::error::ValidationError;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key
    pub stripe_api_key: String,

    /// Currency charged when a purchase does not name one
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Override for the Stripe API base URL (stripe-mock, test doubles)
    pub api_base_url: Option<String>,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.starts_with("sk_test_")
    }

    /// Parsed default currency
    pub fn currency(&self) -> Result<Currency, ValidationError> {
        Currency::new(self.default_currency.as_str())
            .map_err(|_| ValidationError::InvalidCurrency(self.default_currency.clone()))
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_API_KEY"));
        }
        // Restricted (rk_) keys cannot cancel intents; publishable keys cannot create them.
        if !self.stripe_api_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        self.currency()?;
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_api_key: String::new(),
            default_currency: default_currency(),
            api_base_url: None,
        }
    }
}

fn default_currency() -> String {
    "inr".to_string()
}
