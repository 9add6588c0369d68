//! # Sync Framework
//!
//! This crate provides the building blocks for keeping a client-side mirror of server-owned
//! data: independently owned state branches ("slices"), a uniform lifecycle for remote
//! requests, and the HTTP plumbing to reach a JSON REST API.
//!
//! ## Why Slices + the Actor Model?
//!
//! Application state is split into **slices** (bookings, users, wishlist, dashboard...).
//! Each slice is owned by exactly one actor:
//!
//! - Isolated state (no shared memory, no locks)
//! - Events are applied sequentially, in arrival order
//! - Observers learn about every change through a `watch` channel
//!
//! Remote work never happens inside a slice. Clients perform the request, and only the
//! resulting events (pending, succeeded, failed) are dispatched to the owning slice.
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **State Layer** ([`Slice`]) - State shape, initial value and reducer
//! 2. **Runtime Layer** ([`SliceActor`]) - Event processing, change publication
//! 3. **Interface Layer** ([`SliceClient`], [`RequestDescriptor`], [`Transport`]) - Dispatch,
//!    request lifecycle and HTTP
//!
//! ## Request Lifecycle
//!
//! Every remote operation is wrapped in a [`RequestDescriptor`]. Triggering it emits a
//! `Pending` [`Signal`] and then exactly one settlement, each tagged with the same
//! [`Epoch`]:
//!
//! ```rust
//! use sync_framework::{AsyncOutcome, RequestDescriptor, Signal, Slice, SliceActor};
//!
//! struct Loading;
//!
//! impl Slice for Loading {
//!     type State = bool;
//!     type Event = bool;
//!     fn name(&self) -> &'static str { "loading" }
//!     fn initial_state(&self) -> bool { false }
//!     fn reduce(&self, state: &mut bool, event: bool) { *state = event; }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = SliceActor::new(Loading, 8);
//!     tokio::spawn(actor.run());
//!
//!     let fetch = RequestDescriptor::new("fetch flag", "Failed to fetch flag");
//!     let outcome = fetch
//!         .trigger(&client, async { Ok(7) }, |signal: Signal<u32>| {
//!             Some(matches!(signal.outcome, AsyncOutcome::Pending))
//!         })
//!         .await;
//!
//!     assert_eq!(outcome, AsyncOutcome::Succeeded(7));
//!     assert!(!client.snapshot().await.unwrap());
//! }
//! ```
//!
//! Failure messages are normalized by [`extract_message`]: the server's `message` field,
//! then the transport error's own text, then the operation's fallback.
//!
//! ## Entity Collections
//!
//! Server-owned lists share one slice implementation, [`CollectionSlice`], parameterized by
//! a [`Record`] type. A [`Resource`] describes where the collection lives and how its
//! responses are wrapped.
//!
//! ## Testing
//!
//! The [`mock`] module provides a **MockTransport** that implements [`Transport`] entirely
//! in memory, with scripted replies and delays. It lets you test slices and clients without
//! a server, including overlapping requests that settle out of order.
//!
//! The [`local_server`] module runs a scripted HTTP listener on the loopback interface for
//! tests that need the real [`HttpTransport`] on the wire.

pub mod actor;
pub mod client;
pub mod collection;
pub mod descriptor;
pub mod error;
pub mod local_server;
pub mod message;
pub mod mock;
pub mod outcome;
pub mod slice;
pub mod telemetry;
pub mod transport;

// Re-export core types for convenience
pub use actor::SliceActor;
pub use client::SliceClient;
pub use collection::{
    CollectionEvent, CollectionSlice, CollectionState, NoAction, Record, RecordAction, Resource,
};
pub use descriptor::{extract_message, RequestDescriptor};
pub use error::{FrameworkError, TransportError};
pub use message::{Response, SliceRequest};
pub use outcome::{AsyncOutcome, Epoch, EpochTracker, SettlementPolicy, Signal};
pub use slice::Slice;
pub use transport::{
    extract_list, extract_record, HttpTransport, Method, TokenSource, Transport, Url,
};
