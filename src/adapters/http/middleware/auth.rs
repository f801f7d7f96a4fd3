//! Authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that validates the session token and injects the user
//! - `RequireAuth` - Extractor handing the authenticated caller to handlers
//!
//! # Architecture
//!
//! The middleware uses the `SessionValidator` port, so swapping the JWT
//! validator for a mock in tests changes nothing here.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Read the session token from the `Authorization` header.
///
/// Accepts both the bare token and `Bearer <token>`. Blank values count as
/// missing.
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Authentication middleware for ticketing routes.
///
/// This middleware:
/// 1. Extracts the token from the Authorization header
/// 2. Returns 403 when no token was sent
/// 3. Validates the token using the `SessionValidator` port
/// 4. On success, injects `AuthenticatedUser` into request extensions
/// 5. On an invalid or expired token, returns 401
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match extract_token(request.headers()) {
        Some(token) => token.to_string(),
        None => return auth_error(StatusCode::FORBIDDEN, "Token not provided"),
    };

    match validator.validate(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(AuthError::TokenExpired) => auth_error(StatusCode::UNAUTHORIZED, "Token expired"),
        Err(AuthError::InvalidToken) => auth_error(StatusCode::UNAUTHORIZED, "Invalid token"),
    }
}

fn auth_error(status: StatusCode, message: &'static str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": message,
            "code": "AUTH_ERROR"
        })),
    )
        .into_response()
}

/// Extractor that requires authentication.
///
/// Reads the `AuthenticatedUser` injected by `auth_middleware`. Routes
/// mounted without the middleware always reject with 401.
///
/// # Example
///
/// ```ignore
/// async fn list(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("tickets for {}", user.id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No validated user was attached to the request.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => {
                auth_error(StatusCode::UNAUTHORIZED, "Authentication required")
            }
        }
    }
}
