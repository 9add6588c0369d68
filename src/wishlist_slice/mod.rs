//! Wishlist membership: the set of property ids the signed-in user has marked.
//!
//! Mutations are **confirm-then-apply**: the remote call runs first and `items` changes only
//! once the server has acknowledged it. A failed add or remove leaves `items` exactly as it
//! was, so the local set never diverges from the last confirmed server state.

pub mod entity;

pub use entity::*;

use crate::clients::WishlistClient;
use std::sync::Arc;
use sync_framework::{SettlementPolicy, SliceActor, Transport};

pub const PATH: &str = "/api/wishlist";

/// Keys tried, in order, when the list response is an envelope.
pub const LIST_KEYS: &[&str] = &["data", "wishlist", "items"];

/// Creates a new Wishlist slice actor and its client.
pub fn new(
    buffer_size: usize,
    policy: SettlementPolicy,
    transport: Arc<dyn Transport>,
) -> (SliceActor<WishlistSlice>, WishlistClient) {
    let (actor, inner) = SliceActor::new(WishlistSlice::new(policy), buffer_size);
    (actor, WishlistClient::new(inner, transport))
}
