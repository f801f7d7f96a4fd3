//! HTTP middleware for axum.
//!
//! - `auth` - Session token middleware and extractors

pub mod auth;

pub use auth::{auth_middleware, extract_token, AuthRejection, AuthState, RequireAuth};
