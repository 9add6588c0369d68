//! # Generic Client
//!
//! This module defines the generic client for communicating with slice actors.

use crate::error::FrameworkError;
use crate::message::SliceRequest;
use crate::outcome::Epoch;
use crate::slice::Slice;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

/// ## SliceClient
///
/// The `SliceClient<S>` provides a type-safe, async API for driving a `SliceActor<S>`.
/// It forwards requests over a Tokio mpsc channel and returns results via oneshot
/// channels. The client is cheap to clone and can be shared across tasks.
///
/// * **Cloneable** – holds a sender, a watch receiver and a shared epoch counter.
/// * **Epochs** – every clone draws request epochs from the same counter, so epochs are
///   monotonic per slice.
/// * **Subscriptions** – [`subscribe`](Self::subscribe) yields a `watch::Receiver` that
///   observes every published state.
pub struct SliceClient<S: Slice> {
    sender: mpsc::Sender<SliceRequest<S>>,
    watcher: watch::Receiver<S::State>,
    epochs: Arc<AtomicU64>,
}

impl<S: Slice> Clone for SliceClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            watcher: self.watcher.clone(),
            epochs: self.epochs.clone(),
        }
    }
}

impl<S: Slice> SliceClient<S> {
    pub fn new(sender: mpsc::Sender<SliceRequest<S>>, watcher: watch::Receiver<S::State>) -> Self {
        Self {
            sender,
            watcher,
            epochs: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Allocate the next request epoch for this slice.
    pub fn next_epoch(&self) -> Epoch {
        Epoch(self.epochs.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Apply one event and return the resulting state.
    pub async fn dispatch(&self, event: S::Event) -> Result<S::State, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SliceRequest::Dispatch { event, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Read the state, ordered after every event dispatched before this call.
    pub async fn snapshot(&self) -> Result<S::State, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SliceRequest::Snapshot { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Restore the slice's initial state.
    pub async fn reset(&self) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SliceRequest::Reset { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// The last published state, without a round trip to the actor.
    pub fn current(&self) -> S::State {
        self.watcher.borrow().clone()
    }

    /// A receiver notified after every applied event.
    pub fn subscribe(&self) -> watch::Receiver<S::State> {
        let mut watcher = self.watcher.clone();
        watcher.mark_unchanged();
        watcher
    }
}
