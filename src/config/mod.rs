//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `TICKETING` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use event_ticketing::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod payment;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, timeouts, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Ledger database (PostgreSQL)
    pub database: DatabaseConfig,

    /// Payment authority (Stripe)
    pub payment: PaymentConfig,

    /// Session token verification
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TICKETING` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TICKETING__SERVER__PORT=3000` -> `server.port = 3000`
    /// - `TICKETING__DATABASE__URL=...` -> `database.url = ...`
    /// - `TICKETING__PAYMENT__STRIPE_API_KEY=...` -> `payment.stripe_api_key = ...`
    /// - `TICKETING__AUTH__JWT_SECRET=...` -> `auth.jwt_secret = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TICKETING")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.payment.validate()?;
        self.auth.validate(&self.server.environment)?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize the tests that touch them.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("TICKETING__DATABASE__URL", "postgresql://test@localhost/tickets");
        env::set_var("TICKETING__PAYMENT__STRIPE_API_KEY", "sk_test_xxx");
        env::set_var("TICKETING__AUTH__JWT_SECRET", "dev-secret");
    }

    fn clear_env() {
        env::remove_var("TICKETING__DATABASE__URL");
        env::remove_var("TICKETING__PAYMENT__STRIPE_API_KEY");
        env::remove_var("TICKETING__PAYMENT__DEFAULT_CURRENCY");
        env::remove_var("TICKETING__AUTH__JWT_SECRET");
        env::remove_var("TICKETING__SERVER__PORT");
        env::remove_var("TICKETING__SERVER__ENVIRONMENT");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert_eq!(config.database.url, "postgresql://test@localhost/tickets");
        assert_eq!(config.payment.stripe_api_key, "sk_test_xxx");
        assert_eq!(config.auth.jwt_secret.expose_secret(), "dev-secret");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_match_legacy_deployment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.payment.currency().unwrap().as_str(), "inr");
    }

    #[test]
    fn test_overrides_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("TICKETING__SERVER__PORT", "8081");
        env::set_var("TICKETING__PAYMENT__DEFAULT_CURRENCY", "usd");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.payment.currency().unwrap().as_str(), "usd");
    }

    #[test]
    fn test_production_rejects_short_secret() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("TICKETING__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert!(matches!(
            config.validate(),
            Err(ValidationError::JwtSecretTooShort(_))
        ));
    }

    #[test]
    fn test_missing_required_section_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("TICKETING__DATABASE__URL", "postgresql://test@localhost/tickets");
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_err());
    }
}
