//! HS256 session token validation.
//!
//! Verifies the tokens issued by the platform's login service: HMAC-SHA256
//! signed, carrying the account id as `userId` and an `exp` claim.

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account id of the caller.
    #[serde(rename = "userId")]
    pub user_id: i64,

    /// Expiry, seconds since the epoch.
    pub exp: u64,

    /// Issued-at, seconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
}

/// `SessionValidator` backed by a shared HS256 secret.
pub struct JwtSessionValidator {
    key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    /// Create a validator for tokens signed with `secret`.
    pub fn new(secret: &SecretString) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }

    /// Create a validator from the auth configuration section.
    pub fn from_config(config: &AuthConfig) -> Self {
        let mut validator = Self::new(&config.jwt_secret);
        validator.validation.leeway = config.leeway_secs;
        validator
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<SessionClaims>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => {
                    tracing::debug!(error = %e, "rejected session token");
                    AuthError::InvalidToken
                }
            }
        })?;

        let user_id = UserId::new(data.claims.user_id).map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthenticatedUser::new(user_id))
    }
}
