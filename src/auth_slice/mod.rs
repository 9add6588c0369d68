//! Authentication branch: the signed-in user and their token.
//!
//! This is the only branch that outlives a reload. See
//! [`PersistedRoot`](crate::lifecycle::PersistedRoot) for how it is written and read back.

pub mod entity;

pub use entity::*;

use sync_framework::{SliceActor, SliceClient};

pub const LOGIN_PATH: &str = "/api/users/login";

/// Creates a new Auth slice actor seeded with `state`.
///
/// Unlike the other branches this returns the bare slice client: the session has to exist
/// before the transport that reads its token, and [`AuthClient`](crate::clients::AuthClient)
/// needs that transport.
pub fn new(
    buffer_size: usize,
    state: AuthState,
) -> (SliceActor<AuthSlice>, SliceClient<AuthSlice>) {
    SliceActor::with_state(AuthSlice, state, buffer_size)
}
