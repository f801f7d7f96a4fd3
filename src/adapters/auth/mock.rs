//! Mock session validator for testing.
//!
//! Implements the `SessionValidator` port with a fixed token table so tests
//! can authenticate without signing real tokens.
//!
//! # Example
//!
//! ```ignore
//! use event_ticketing::adapters::auth::MockSessionValidator;
//!
//! let validator = MockSessionValidator::new().with_test_user("alice-token", 7);
//! let user = validator.validate("alice-token").await?;
//! ```

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Mock session validator for testing.
///
/// Tokens not in the table return `InvalidToken`.
#[derive(Debug, Default, Clone)]
pub struct MockSessionValidator {
    tokens: HashMap<String, AuthenticatedUser>,
    force_error: Option<AuthError>,
}

impl MockSessionValidator {
    /// Creates a new empty mock validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(mut self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.insert(token.into(), user);
        self
    }

    /// Adds a valid token for the account `user_id`.
    pub fn with_test_user(self, token: impl Into<String>, user_id: i64) -> Self {
        self.with_user(token, AuthenticatedUser::new(UserId::from_i64(user_id)))
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(mut self, error: AuthError) -> Self {
        self.force_error = Some(error);
        self
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = &self.force_error {
            return Err(error.clone());
        }
        self.tokens
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
