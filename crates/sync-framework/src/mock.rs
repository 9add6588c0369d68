//! # Mock Transport & Testing Guide
//!
//! [`MockTransport`] implements [`Transport`] entirely in memory. Replies are scripted per
//! `(method, path)` and handed out in FIFO order, which makes success, failure and
//! out-of-order settlement reproducible without a server.
//!
//! ## When to use Mocks vs a Real Server
//!
//! | Feature | MockTransport | HttpTransport |
//! |---------|---------------|---------------|
//! | **Speed** | Instant (in-memory) | Network bound |
//! | **Determinism** | Scripted replies and delays | Subject to the server |
//! | **Error Injection** | Easy (`return_status`, `return_err`) | Hard |
//! | **Use Case** | Testing slices and clients | Running the application |
//!
//! ## Example
//!
//! ```rust
//! use sync_framework::mock::MockTransport;
//! use sync_framework::transport::{Method, Transport};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect(Method::GET, "/api/bookings")
//!         .return_ok(json!({ "data": [] }));
//!     mock.expect(Method::DELETE, "/api/bookings/B1")
//!         .return_status(404, json!({ "message": "Booking not found" }));
//!
//!     assert!(mock.get("/api/bookings").await.is_ok());
//!     let error = mock.delete("/api/bookings/B1").await.unwrap_err();
//!     assert_eq!(error.server_message(), Some("Booking not found"));
//!
//!     mock.verify();
//! }
//! ```
//!
//! ## Simulating Slow Responses
//!
//! [`ReplyBuilder::delayed`] holds a reply back before it settles. Two scripted replies on
//! the same route with different delays reproduce overlapping requests that settle out of
//! issue order.

use crate::error::TransportError;
use crate::transport::{Method, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

type Route = (Method, String);

/// One scripted reply.
struct Reply {
    response: Result<Value, TransportError>,
    delay: Option<Duration>,
}

/// A request observed by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct Script {
    replies: HashMap<Route, VecDeque<Reply>>,
    calls: Vec<RecordedCall>,
}

/// In-memory [`Transport`] with expectation tracking.
///
/// Cloning shares the script, so a test can keep one handle for assertions while the
/// store under test owns another.
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<Script>>,
}

impl MockTransport {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Expects one request on `method path`.
    pub fn expect(&self, method: Method, path: impl Into<String>) -> ReplyBuilder {
        ReplyBuilder {
            route: (method, path.into()),
            delay: None,
            script: self.script.clone(),
        }
    }

    /// Every request received so far, in arrival order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Number of scripted replies not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lock().replies.values().map(VecDeque::len).sum()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.remaining();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, TransportError> {
        let reply = {
            let mut script = self.lock();
            script.calls.push(RecordedCall {
                method: method.clone(),
                path: path.to_string(),
                body,
            });
            script
                .replies
                .get_mut(&(method.clone(), path.to_string()))
                .and_then(VecDeque::pop_front)
        };

        let Some(reply) = reply else {
            panic!("Unexpected request: {method} {path}");
        };
        if let Some(delay) = reply.delay {
            tokio::time::sleep(delay).await;
        }
        reply.response
    }
}

/// Builder for one scripted reply.
pub struct ReplyBuilder {
    route: Route,
    delay: Option<Duration>,
    script: Arc<Mutex<Script>>,
}

impl ReplyBuilder {
    /// Hold the reply back for `delay` before it settles.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sets the expectation to return a successful body.
    pub fn return_ok(self, body: Value) {
        self.push(Ok(body));
    }

    /// Sets the expectation to fail with a status and JSON body.
    pub fn return_status(self, status: u16, body: Value) {
        self.push(Err(TransportError::Status {
            status,
            body: Some(body),
        }));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: TransportError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Value, TransportError>) {
        let mut script = self
            .script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        script
            .replies
            .entry(self.route)
            .or_default()
            .push_back(Reply {
                response,
                delay: self.delay,
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_replies_are_fifo_per_route() {
        let mock = MockTransport::new();
        mock.expect(Method::GET, "/api/wishlist")
            .return_ok(json!({ "data": ["P1"] }));
        mock.expect(Method::GET, "/api/wishlist")
            .return_err(TransportError::Network("offline".into()));

        assert_eq!(
            mock.get("/api/wishlist").await,
            Ok(json!({ "data": ["P1"] }))
        );
        assert_eq!(
            mock.get("/api/wishlist").await,
            Err(TransportError::Network("offline".into()))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_calls_are_recorded_with_bodies() {
        let mock = MockTransport::new();
        mock.expect(Method::PATCH, "/api/bookings/B1")
            .return_ok(json!({ "booking": { "id": "B1" } }));

        mock.patch("/api/bookings/B1", Some(json!({ "status": "confirmed" })))
            .await
            .unwrap();

        assert_eq!(
            mock.calls(),
            vec![RecordedCall {
                method: Method::PATCH,
                path: "/api/bookings/B1".into(),
                body: Some(json!({ "status": "confirmed" })),
            }]
        );
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_flags_unused_replies() {
        let mock = MockTransport::new();
        mock.expect(Method::GET, "/api/users").return_ok(json!([]));
        mock.verify();
    }
}
