//! # Async Request Descriptor
//!
//! A [`RequestDescriptor`] wraps one named remote operation (e.g. "fetch bookings") and
//! turns a single attempt at it into correlated [`Signal`]s for exactly one owning slice:
//! pending, then either succeeded or failed.
//!
//! There is no retry and no cancellation. Triggering the same operation twice issues two
//! independent attempts and both settle; how the slice treats the older one is decided by
//! its [`SettlementPolicy`](crate::outcome::SettlementPolicy).

use crate::client::SliceClient;
use crate::error::TransportError;
use crate::outcome::{AsyncOutcome, Signal};
use crate::slice::Slice;
use std::future::Future;
use tracing::{debug, warn};

/// Normalize a failed call into the message stored in a slice's `error` field.
///
/// Priority order:
/// 1. the `message` field of the server's error body,
/// 2. the transport error's own message,
/// 3. the operation-specific `fallback`.
pub fn extract_message(error: &TransportError, fallback: &str) -> String {
    if let Some(message) = error.server_message() {
        return message.to_string();
    }
    let own = error.to_string();
    if own.trim().is_empty() {
        fallback.to_string()
    } else {
        own
    }
}

/// A named remote operation with its fallback failure message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    name: String,
    fallback: String,
}

impl RequestDescriptor {
    pub fn new(name: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fallback: fallback.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Run `call` once and feed its lifecycle into the owning slice.
    ///
    /// `into_event` maps each [`Signal`] onto the slice's event type. Returning `None`
    /// leaves the slice untouched for that signal (mutations typically ignore `Pending`).
    ///
    /// The returned outcome is never `Pending`. Failures to reach the slice actor are
    /// logged and otherwise ignored, so this never returns an error.
    pub async fn trigger<S, T, Fut, F>(
        &self,
        client: &SliceClient<S>,
        call: Fut,
        mut into_event: F,
    ) -> AsyncOutcome<T>
    where
        S: Slice,
        T: Clone + Send,
        Fut: Future<Output = Result<T, TransportError>> + Send,
        F: FnMut(Signal<T>) -> Option<S::Event> + Send,
    {
        let epoch = client.next_epoch();
        debug!(operation = %self.name, %epoch, "Pending");
        if let Some(event) = into_event(Signal::new(epoch, AsyncOutcome::Pending)) {
            self.deliver(client, event).await;
        }

        let outcome = match call.await {
            Ok(value) => {
                debug!(operation = %self.name, %epoch, "Succeeded");
                AsyncOutcome::Succeeded(value)
            }
            Err(error) => {
                let message = extract_message(&error, &self.fallback);
                warn!(operation = %self.name, %epoch, error = %error, %message, "Request failed");
                AsyncOutcome::Failed(message)
            }
        };

        if let Some(event) = into_event(Signal::new(epoch, outcome.clone())) {
            self.deliver(client, event).await;
        }
        outcome
    }

    async fn deliver<S: Slice>(&self, client: &SliceClient<S>, event: S::Event) {
        if let Err(e) = client.dispatch(event).await {
            warn!(operation = %self.name, error = %e, "Slice unavailable, settlement dropped");
        }
    }
}
