//! # Property Client
//!
//! Provides a high-level API for the properties collection, including verification.
use crate::clients::collection_client::CollectionClient;
use crate::model::{Property, PropertyUpdate};
use crate::property_slice::{PropertyAction, PropertySlice, RESOURCE};
use std::sync::Arc;
use sync_framework::{AsyncOutcome, Resource, SliceClient, Transport};
use tracing::{debug, instrument};

/// Client for the properties collection.
#[derive(Clone)]
pub struct PropertyClient {
    inner: SliceClient<PropertySlice>,
    transport: Arc<dyn Transport>,
}

impl PropertyClient {
    pub fn new(inner: SliceClient<PropertySlice>, transport: Arc<dyn Transport>) -> Self {
        Self { inner, transport }
    }

    /// Mark a property as verified.
    #[instrument(skip(self))]
    pub async fn verify(&self, id: &str) -> AsyncOutcome<Property> {
        debug!("Verifying property {}", id);
        self.perform_action(id, PropertyAction::Verify).await
    }
}

impl CollectionClient for PropertyClient {
    type Record = Property;
    type Update = PropertyUpdate;
    type Action = PropertyAction;

    fn inner(&self) -> &SliceClient<PropertySlice> {
        &self.inner
    }

    fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    fn resource(&self) -> &Resource {
        &RESOURCE
    }
}
