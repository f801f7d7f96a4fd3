//! End-to-end HTTP tests for the ticket endpoints.
//!
//! Requests go through the full application router (trace, CORS and
//! timeout layers) with real HS256 session tokens, backed by the in-memory
//! ledger and the mock payment authority.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use event_ticketing::adapters::auth::{JwtSessionValidator, SessionClaims};
use event_ticketing::adapters::http::{build_router, TicketingAppState};
use event_ticketing::adapters::memory::InMemoryLedger;
use event_ticketing::adapters::stripe::MockPaymentAuthority;
use event_ticketing::config::ServerConfig;
use event_ticketing::domain::foundation::{EventId, UserId};
use event_ticketing::domain::ticketing::{Amount, Event};

// =============================================================================
// Test Infrastructure
// =============================================================================

const SECRET: &str = "an-hs256-secret-that-is-long-enough-for-prod";

struct TestApp {
    router: Router,
    ledger: InMemoryLedger,
    authority: MockPaymentAuthority,
}

async fn test_app() -> TestApp {
    let ledger = InMemoryLedger::new();
    ledger
        .add_event(Event {
            id: EventId::from_i64(3),
            name: "Harbour Lights".to_string(),
            ticket_price: Amount::from_minor_units(250),
            is_public: true,
            creator_id: UserId::from_i64(1),
        })
        .await;
    let authority = MockPaymentAuthority::new();
    let validator = JwtSessionValidator::new(&SecretString::new(SECRET.to_string()));

    let router = build_router(
        TicketingAppState::new(Arc::new(authority.clone()), Arc::new(ledger.clone())),
        Arc::new(validator),
        &ServerConfig::default(),
    );

    TestApp {
        router,
        ledger,
        authority,
    }
}

fn now() -> u64 {
    chrono::Utc::now().timestamp() as u64
}

fn token_for(user_id: i64) -> String {
    token_with_exp(user_id, now() + 3600)
}

fn token_with_exp(user_id: i64, exp: u64) -> String {
    let claims = SessionClaims {
        user_id,
        exp,
        iat: Some(now()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    auth: Option<String>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_body(
    app: &TestApp,
    uri: &str,
    content_type: &str,
    body: &str,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, token_for(7))
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn buy(app: &TestApp, user_id: i64) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/event/3/tickets",
        Some(format!("Bearer {}", token_for(user_id))),
        Some(json!({"totalAmount": 500, "quantity": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["ticketId"].as_i64().unwrap()
}

// =============================================================================
// Purchase
// =============================================================================

#[tokio::test]
async fn purchase_with_bearer_token_books_ticket_for_token_user() {
    let app = test_app().await;

    let ticket_id = buy(&app, 7).await;

    let tickets = app.ledger.tickets().await;
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].id.as_i64(), ticket_id);
    assert_eq!(tickets[0].user_id, UserId::from_i64(7));
    assert_eq!(tickets[0].quantity, 2);
    assert_eq!(app.authority.call_count("authorize"), 1);
}

#[tokio::test]
async fn purchase_accepts_raw_token_header() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/event/3/tickets",
        Some(token_for(7)),
        Some(json!({"totalAmount": 500, "quantity": 1})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Tickets purchased successfully");
}

#[tokio::test]
async fn purchase_accepts_urlencoded_form() {
    let app = test_app().await;

    let (status, body) = send_body(
        &app,
        "/event/3/tickets",
        "application/x-www-form-urlencoded",
        "totalAmount=500&quantity=2",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Tickets purchased successfully");
    let payments = app.ledger.payments().await;
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].amount, Amount::from_minor_units(500));
    assert_eq!(app.ledger.tickets().await[0].quantity, 2);
}

#[tokio::test]
async fn purchase_accepts_amount_as_json_string() {
    let app = test_app().await;

    let (status, _) = send_body(
        &app,
        "/event/3/tickets",
        "application/json",
        r#"{"totalAmount":"500","quantity":"2"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        app.ledger.payments().await[0].amount,
        Amount::from_minor_units(500)
    );
}

#[tokio::test]
async fn unreadable_body_gets_json_error_and_no_charge() {
    let app = test_app().await;

    let (status, body) = send_body(
        &app,
        "/event/3/tickets",
        "application/json",
        r#"{"totalAmount":"lots","quantity":2}"#,
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error_code"], "VALIDATION_FAILED");
    assert!(!app.authority.was_called("authorize"));
    assert_eq!(app.ledger.payment_count().await, 0);
}

#[tokio::test]
async fn purchase_for_unknown_event_is_not_found() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/event/99/tickets",
        Some(token_for(7)),
        Some(json!({"totalAmount": 500, "quantity": 1})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "EVENT_NOT_FOUND");
    assert_eq!(app.ledger.payment_count().await, 0);
}

#[tokio::test]
async fn missing_token_is_forbidden() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/event/3/tickets",
        None,
        Some(json!({"totalAmount": 500, "quantity": 1})),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Token not provided");
    assert!(!app.authority.was_called("authorize"));
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let app = test_app().await;

    let (status, _) = send(
        &app,
        Method::GET,
        "/event/tickets",
        Some(token_with_exp(7, now() - 3600)),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_other_secret_is_unauthorized() {
    let app = test_app().await;
    let forged = encode(
        &Header::default(),
        &SessionClaims {
            user_id: 7,
            exp: now() + 3600,
            iat: None,
        },
        &EncodingKey::from_secret(b"some-other-secret"),
    )
    .unwrap();

    let (status, _) = send(&app, Method::GET, "/event/tickets", Some(forged), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Cancel and list
// =============================================================================

#[tokio::test]
async fn cancel_then_list_shows_remaining_tickets() {
    let app = test_app().await;
    let first = buy(&app, 7).await;
    let second = buy(&app, 7).await;

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/event/tickets/{}", first),
        Some(token_for(7)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Ticket canceled and refund processed successfully"
    );

    let (status, body) = send(&app, Method::GET, "/event/tickets", Some(token_for(7)), None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body["tickets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second]);
}

#[tokio::test]
async fn cancel_of_another_users_ticket_is_not_found() {
    let app = test_app().await;
    let ticket_id = buy(&app, 7).await;

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/event/tickets/{}", ticket_id),
        Some(token_for(8)),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.ledger.ticket_count().await, 1);
    assert!(!app.authority.was_called("reverse"));
}

#[tokio::test]
async fn failed_refund_keeps_ticket() {
    let app = test_app().await;
    let ticket_id = buy(&app, 7).await;
    app.authority.fail_reversals_with("authority unavailable");

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/event/tickets/{}", ticket_id),
        Some(token_for(7)),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error_code"], "REFUND_FAILED");
    assert_eq!(app.ledger.ticket_count().await, 1);
}
