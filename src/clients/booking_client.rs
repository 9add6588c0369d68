//! # Booking Client
//!
//! Provides a high-level API for the bookings collection.
//! It wraps a `SliceClient<BookingSlice>` plus the transport and exposes the refund action.
use crate::booking_slice::{BookingAction, BookingSlice, RESOURCE};
use crate::clients::collection_client::CollectionClient;
use crate::model::{Booking, BookingUpdate};
use std::sync::Arc;
use sync_framework::{AsyncOutcome, Resource, SliceClient, Transport};
use tracing::{debug, instrument};

/// Client for the bookings collection.
#[derive(Clone)]
pub struct BookingClient {
    inner: SliceClient<BookingSlice>,
    transport: Arc<dyn Transport>,
}

impl BookingClient {
    pub fn new(inner: SliceClient<BookingSlice>, transport: Arc<dyn Transport>) -> Self {
        Self { inner, transport }
    }

    /// Refund a booking. The refunded record replaces the local copy.
    #[instrument(skip(self))]
    pub async fn refund(&self, id: &str) -> AsyncOutcome<Booking> {
        debug!("Refunding booking {}", id);
        self.perform_action(id, BookingAction::Refund).await
    }
}

impl CollectionClient for BookingClient {
    type Record = Booking;
    type Update = BookingUpdate;
    type Action = BookingAction;

    fn inner(&self) -> &SliceClient<BookingSlice> {
        &self.inner
    }

    fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    fn resource(&self) -> &Resource {
        &RESOURCE
    }
}
