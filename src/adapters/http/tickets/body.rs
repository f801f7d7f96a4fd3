//! Request body extractor accepting JSON or urlencoded forms.
//!
//! Existing clients post purchases either way, so the body is read as a form
//! when the request says so and as JSON otherwise. Rejections are reported
//! in the same `ErrorResponse` shape as every other ticketing error.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header,
    Form, Json,
};
use serde::de::DeserializeOwned;

use super::handlers::TicketingApiError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Body deserialized from either `application/json` or a urlencoded form.
///
/// # Example
///
/// ```ignore
/// async fn handler(JsonOrForm(request): JsonOrForm<PurchaseTicketsRequest>) { ... }
/// ```
#[derive(Debug, Clone)]
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = TicketingApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| TicketingApiError::invalid_body(e.status(), e.body_text()))?;
            return Ok(Self(value));
        }

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| TicketingApiError::invalid_body(e.status(), e.body_text()))?;
        Ok(Self(value))
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim_start().starts_with(FORM_CONTENT_TYPE))
}
