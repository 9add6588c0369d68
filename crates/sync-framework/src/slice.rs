//! # Slice Trait
//!
//! This module defines the [`Slice`] trait, the contract every branch of the application
//! state must satisfy to be owned by a [`SliceActor`](crate::actor::SliceActor).

use std::fmt::Debug;

/// One independently owned branch of application state.
///
/// # Architecture Note
/// By defining a contract (`Slice`) that every state branch (bookings, wishlist,
/// dashboard...) satisfies, the actor loop, the client and the request plumbing are written
/// *once* and reused for all of them.
///
/// The associated `Event` type is a closed enum per slice. A slice can only be driven by
/// its own events, so the compiler rejects an event sent to the wrong branch and a `match`
/// in `reduce` rejects an unhandled one.
///
/// `reduce` is synchronous and pure with respect to the outside world: all I/O happens in
/// the clients, and only the resulting events reach the slice.
pub trait Slice: Send + Sync + 'static {
    /// The state shape owned by this slice.
    type State: Clone + Debug + Send + Sync + 'static;

    /// Closed set of transitions this slice understands.
    type Event: Debug + Send + 'static;

    /// Short name used in logs (e.g. `"bookings"`).
    fn name(&self) -> &'static str;

    /// The hard-coded initial shape. Also the target of a reset.
    fn initial_state(&self) -> Self::State;

    /// Apply one event to the state.
    fn reduce(&self, state: &mut Self::State, event: Self::Event);
}
