//! # Public Property Client
use crate::clients::collection_client::CollectionClient;
use crate::model::{PublicProperty, PublicPropertyCreate, PublicPropertyUpdate};
use crate::public_property_slice::{PublicPropertySlice, RESOURCE};
use std::sync::Arc;
use sync_framework::{AsyncOutcome, NoAction, Resource, SliceClient, Transport};
use tracing::instrument;

/// Client for the public properties collection.
#[derive(Clone)]
pub struct PublicPropertyClient {
    inner: SliceClient<PublicPropertySlice>,
    transport: Arc<dyn Transport>,
}

impl PublicPropertyClient {
    pub fn new(inner: SliceClient<PublicPropertySlice>, transport: Arc<dyn Transport>) -> Self {
        Self { inner, transport }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, params: PublicPropertyCreate) -> AsyncOutcome<PublicProperty> {
        self.submit_create(RESOURCE.path, &params).await
    }
}

impl CollectionClient for PublicPropertyClient {
    type Record = PublicProperty;
    type Update = PublicPropertyUpdate;
    type Action = NoAction;

    fn inner(&self) -> &SliceClient<PublicPropertySlice> {
        &self.inner
    }

    fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    fn resource(&self) -> &Resource {
        &RESOURCE
    }
}
