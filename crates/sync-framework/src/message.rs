//! # Generic Messages
//!
//! This module defines the message types used for communication between the
//! `SliceClient` and the `SliceActor`.

use crate::error::FrameworkError;
use crate::slice::Slice;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to a slice actor.
///
/// - **Dispatch**: apply one [`Slice::Event`] and reply with the resulting state.
/// - **Snapshot**: reply with the current state, ordered after every earlier dispatch.
/// - **Reset**: restore [`Slice::initial_state`].
#[derive(Debug)]
pub enum SliceRequest<S: Slice> {
    Dispatch {
        event: S::Event,
        respond_to: Response<S::State>,
    },
    Snapshot {
        respond_to: Response<S::State>,
    },
    Reset {
        respond_to: Response<()>,
    },
}
