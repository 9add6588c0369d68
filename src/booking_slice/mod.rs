//! Booking collection, including the refund action.

mod actions;
pub mod entity;

pub use actions::*;

use crate::clients::BookingClient;
use crate::model::Booking;
use std::sync::Arc;
use sync_framework::{CollectionSlice, Resource, SettlementPolicy, SliceActor, Transport};

pub const RESOURCE: Resource = Resource {
    path: "/api/bookings",
    list_query: None,
    singular: "booking",
    plural: "bookings",
    list_keys: &["data", "bookings"],
    record_keys: &["booking", "data"],
};

pub type BookingSlice = CollectionSlice<Booking>;

/// Creates a new Booking slice actor and its client.
pub fn new(
    buffer_size: usize,
    policy: SettlementPolicy,
    transport: Arc<dyn Transport>,
) -> (SliceActor<BookingSlice>, BookingClient) {
    let (actor, inner) = SliceActor::new(CollectionSlice::new(RESOURCE.plural, policy), buffer_size);
    (actor, BookingClient::new(inner, transport))
}
