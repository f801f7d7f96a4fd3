//! Mock payment authority for testing.
//!
//! Provides a configurable implementation of `PaymentAuthority` for unit and
//! integration tests. Supports:
//! - Error injection per operation
//! - Call tracking
//! - Tracking which authorizations are still outstanding

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::ports::{
    AuthorizationHandle, AuthorizeChargeRequest, PaymentAuthority, PaymentError,
    ReversalOutcome,
};

/// Mock payment authority for testing.
///
/// # Example
///
/// ```ignore
/// let authority = MockPaymentAuthority::new();
/// authority.fail_reversals_with("charge already captured");
///
/// let outcome = authority.reverse(&handle).await;
/// assert!(!outcome.is_reversed());
/// ```
#[derive(Clone, Default)]
pub struct MockPaymentAuthority {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Error returned by every `authorize` call while set.
    authorize_error: Option<PaymentError>,

    /// Reason returned by every `reverse` call while set.
    reverse_failure: Option<String>,

    /// Authorizations handed out, keyed by id, with their reversal state.
    authorizations: HashMap<String, AuthorizationRecord>,

    /// Track method calls for assertions.
    call_log: Vec<MethodCall>,
}

#[derive(Debug, Clone)]
struct AuthorizationRecord {
    handle: AuthorizationHandle,
    reversed: bool,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockPaymentAuthority {
    /// Create a mock that authorizes and reverses everything.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not cascade into every other assertion.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make every subsequent `authorize` call fail with `error`.
    pub fn fail_authorizations_with(&self, error: PaymentError) {
        self.state().authorize_error = Some(error);
    }

    /// Make every subsequent `reverse` call fail with `reason`.
    pub fn fail_reversals_with(&self, reason: impl Into<String>) {
        self.state().reverse_failure = Some(reason.into());
    }

    /// Clear all injected failures.
    pub fn clear_failures(&self) {
        let mut state = self.state();
        state.authorize_error = None;
        state.reverse_failure = None;
    }

    /// Get all recorded method calls.
    pub fn calls(&self) -> Vec<MethodCall> {
        self.state().call_log.clone()
    }

    /// Number of calls made to `method`.
    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// Check if a method was called.
    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    /// Handles issued by successful `authorize` calls, in no particular order.
    pub fn authorizations(&self) -> Vec<AuthorizationHandle> {
        self.state()
            .authorizations
            .values()
            .map(|r| r.handle.clone())
            .collect()
    }

    /// Check whether the authorization with `id` has been reversed.
    pub fn is_reversed(&self, id: &str) -> bool {
        self.state()
            .authorizations
            .get(id)
            .map(|r| r.reversed)
            .unwrap_or(false)
    }

    /// Authorizations that were issued and never reversed.
    pub fn outstanding_count(&self) -> usize {
        self.state()
            .authorizations
            .values()
            .filter(|r| !r.reversed)
            .count()
    }

    fn record_call(state: &mut MockState, method: &str, args: Vec<String>) {
        state.call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }
}

#[async_trait]
impl PaymentAuthority for MockPaymentAuthority {
    async fn authorize(
        &self,
        request: AuthorizeChargeRequest,
    ) -> Result<AuthorizationHandle, PaymentError> {
        let mut state = self.state();
        Self::record_call(
            &mut state,
            "authorize",
            vec![request.amount.to_string(), request.user_id.to_string()],
        );

        if let Some(error) = state.authorize_error.clone() {
            return Err(error);
        }
        if !request.amount.is_positive() {
            return Err(PaymentError::invalid_amount(request.amount));
        }

        let simple = Uuid::new_v4().simple().to_string();
        let handle = AuthorizationHandle {
            id: format!("pi_mock_{}", &simple[..16]),
            amount: request.amount,
            currency: request.currency.unwrap_or_default(),
        };
        tracing::debug!(intent_id = %handle.id, amount = %handle.amount, "mock authorization");

        state.authorizations.insert(
            handle.id.clone(),
            AuthorizationRecord {
                handle: handle.clone(),
                reversed: false,
            },
        );
        Ok(handle)
    }

    async fn reverse(&self, handle: &AuthorizationHandle) -> ReversalOutcome {
        let mut state = self.state();
        Self::record_call(&mut state, "reverse", vec![handle.id.clone()]);

        if let Some(reason) = state.reverse_failure.clone() {
            return ReversalOutcome::failed(reason);
        }

        match state.authorizations.get_mut(&handle.id) {
            Some(record) if record.reversed => {
                ReversalOutcome::failed(format!("authorization {} already reversed", handle.id))
            }
            Some(record) => {
                record.reversed = true;
                ReversalOutcome::Reversed {
                    reversal_id: handle.id.clone(),
                }
            }
            None => ReversalOutcome::failed(format!("no such authorization: {}", handle.id)),
        }
    }
}
