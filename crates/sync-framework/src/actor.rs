//! # Generic Slice Actor
//!
//! This module defines the `SliceActor`, the component that owns one branch of the
//! application state. It implements the "Server" side of the Actor Model: events are
//! applied sequentially, so the state needs no `Mutex` or `RwLock`.

use crate::client::SliceClient;
use crate::message::SliceRequest;
use crate::slice::Slice;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

/// The generic actor that owns the state of one [`Slice`].
///
/// # Architecture Note
/// Each `SliceActor` runs in its own Tokio task. Many slices make progress in parallel,
/// but every event for a given slice is applied in arrival order by exactly one task.
///
/// After every applied event (and after a reset) the new state is published on a
/// `watch` channel, which is how subscribers and the persistence gate learn about
/// changes.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `SliceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Run**: Spawn the actor's run loop in a background task.
/// 3.  **Use**: Clone the client freely; dropping every clone stops the actor.
///
/// ```rust
/// use sync_framework::{Slice, SliceActor};
///
/// struct Counter;
///
/// impl Slice for Counter {
///     type State = u32;
///     type Event = u32;
///     fn name(&self) -> &'static str { "counter" }
///     fn initial_state(&self) -> u32 { 0 }
///     fn reduce(&self, state: &mut u32, event: u32) { *state += event; }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = SliceActor::new(Counter, 8);
///     tokio::spawn(actor.run());
///     assert_eq!(client.dispatch(2).await.unwrap(), 2);
/// }
/// ```
pub struct SliceActor<S: Slice> {
    slice: S,
    receiver: mpsc::Receiver<SliceRequest<S>>,
    state: S::State,
    publisher: watch::Sender<S::State>,
}

impl<S: Slice> SliceActor<S> {
    /// Creates a new `SliceActor` starting from the slice's initial state.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(slice: S, buffer_size: usize) -> (Self, SliceClient<S>) {
        let initial = slice.initial_state();
        Self::with_state(slice, initial, buffer_size)
    }

    /// Creates a new `SliceActor` seeded with an explicit state (used for rehydration).
    pub fn with_state(slice: S, state: S::State, buffer_size: usize) -> (Self, SliceClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (publisher, watcher) = watch::channel(state.clone());
        let actor = Self {
            slice,
            receiver,
            state,
            publisher,
        };
        let client = SliceClient::new(sender, watcher);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self) {
        let slice = self.slice.name();
        info!(slice, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SliceRequest::Dispatch { event, respond_to } => {
                    debug!(slice, ?event, "Dispatch");
                    self.slice.reduce(&mut self.state, event);
                    self.publisher.send_replace(self.state.clone());
                    let _ = respond_to.send(Ok(self.state.clone()));
                }
                SliceRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.state.clone()));
                }
                SliceRequest::Reset { respond_to } => {
                    info!(slice, "Reset");
                    self.state = self.slice.initial_state();
                    self.publisher.send_replace(self.state.clone());
                    let _ = respond_to.send(Ok(()));
                }
            }
        }

        info!(slice, "Shutdown");
    }
}
