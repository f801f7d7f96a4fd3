//! Authentication configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Shortest HS256 secret accepted outside development.
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Authentication configuration (HS256 session tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared secret used to verify session tokens
    pub jwt_secret: SecretString,

    /// Clock skew tolerated on `exp`, in seconds
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// In production, requires a secret long enough for HS256.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        use secrecy::ExposeSecret;

        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN));
        }
        Ok(())
    }
}

fn default_leeway() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: SecretString::new(secret.to_string()),
            leeway_secs: default_leeway(),
        }
    }

    #[test]
    fn test_validation_missing_secret() {
        assert!(config("").validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_short_secret_allowed_in_development() {
        assert!(config("dev").validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_short_secret_rejected_in_production() {
        assert!(matches!(
            config("dev").validate(&Environment::Production),
            Err(ValidationError::JwtSecretTooShort(32))
        ));
    }

    #[test]
    fn test_sixteen_byte_secret_needs_rekey_for_production() {
        let secret = "0123456789abcdef";
        assert!(config(secret).validate(&Environment::Development).is_ok());
        assert!(config(secret).validate(&Environment::Production).is_err());
    }

    #[test]
    fn test_long_secret_accepted_in_production() {
        let secret = "x".repeat(48);
        assert!(config(&secret).validate(&Environment::Production).is_ok());
    }
}
