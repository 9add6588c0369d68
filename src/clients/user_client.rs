//! # User Client
use crate::clients::collection_client::CollectionClient;
use crate::model::{User, UserCreate, UserUpdate};
use crate::user_slice::{UserSlice, RESOURCE, SIGNUP_PATH};
use std::sync::Arc;
use sync_framework::{AsyncOutcome, NoAction, Resource, SliceClient, Transport};
use tracing::{debug, instrument};

/// Client for the users collection.
#[derive(Clone)]
pub struct UserClient {
    inner: SliceClient<UserSlice>,
    transport: Arc<dyn Transport>,
}

impl UserClient {
    pub fn new(inner: SliceClient<UserSlice>, transport: Arc<dyn Transport>) -> Self {
        Self { inner, transport }
    }

    /// Register a new account through the signup endpoint.
    #[instrument(skip(self, params), fields(email = %params.email))]
    pub async fn create(&self, params: UserCreate) -> AsyncOutcome<User> {
        debug!("Sending request");
        self.submit_create(SIGNUP_PATH, &params).await
    }
}

impl CollectionClient for UserClient {
    type Record = User;
    type Update = UserUpdate;
    type Action = NoAction;

    fn inner(&self) -> &SliceClient<UserSlice> {
        &self.inner
    }

    fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    fn resource(&self) -> &Resource {
        &RESOURCE
    }
}
