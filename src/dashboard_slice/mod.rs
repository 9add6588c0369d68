//! Dashboard aggregate: one composite view built from four independent fetches.
//!
//! The public-properties fetch is guarded: if it fails, its slot resolves to an empty list.
//! Users, properties and bookings are unguarded, and any one of them failing fails the
//! whole aggregate without producing a partial composite.

pub mod entity;

pub use entity::*;

use crate::clients::DashboardClient;
use std::sync::Arc;
use sync_framework::{SettlementPolicy, SliceActor, Transport};

/// Creates a new Dashboard slice actor and its client.
pub fn new(
    buffer_size: usize,
    policy: SettlementPolicy,
    transport: Arc<dyn Transport>,
) -> (SliceActor<DashboardSlice>, DashboardClient) {
    let (actor, inner) = SliceActor::new(DashboardSlice::new(policy), buffer_size);
    (actor, DashboardClient::new(inner, transport))
}
