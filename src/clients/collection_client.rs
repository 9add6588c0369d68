use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;
use sync_framework::{
    extract_list, extract_record, AsyncOutcome, CollectionEvent, CollectionSlice,
    CollectionState, FrameworkError, Record, RecordAction, Resource, SliceClient, Transport,
    TransportError,
};
use tokio::sync::watch;
use tracing::{debug, instrument};

/// Trait for entity clients to inherit the standard collection operations.
///
/// This trait removes the per-entity boilerplate: every entity client exposes the same
/// fetch-all, update, delete and action operations against its [`Resource`], and feeds the
/// outcomes into its [`CollectionSlice`]. Operations never return `Err`; failures end up in
/// the slice's `error` field and in the returned [`AsyncOutcome`].
#[async_trait]
pub trait CollectionClient: Send + Sync {
    type Record: Record<Id = String>;

    /// Partial-update payload sent as the PATCH body.
    type Update: Serialize + Debug + Send + Sync;

    /// Entity-specific operations (verify, refund...).
    type Action: RecordAction;

    /// Access the inner slice client.
    fn inner(&self) -> &SliceClient<CollectionSlice<Self::Record>>;

    fn transport(&self) -> &dyn Transport;

    fn resource(&self) -> &Resource;

    /// Replace the whole collection with the server's list.
    #[instrument(skip(self))]
    async fn fetch_all(&self) -> AsyncOutcome<Vec<Self::Record>> {
        debug!("Sending request");
        let resource = self.resource();
        let transport = self.transport();
        let call = async move {
            let body = transport.get(&resource.list_path()).await?;
            extract_list::<Self::Record>(body, resource.list_keys)
        };
        resource
            .fetch_descriptor()
            .trigger(self.inner(), call, CollectionEvent::from_fetch)
            .await
    }

    /// Apply a partial update; the returned record replaces the one with the same id.
    #[instrument(skip(self))]
    async fn update(&self, id: &str, changes: Self::Update) -> AsyncOutcome<Self::Record> {
        debug!("Sending request");
        let resource = self.resource();
        let transport = self.transport();
        let call = async move {
            let body = encode(&changes)?;
            let response = transport.patch(&resource.item_path(&id), Some(body)).await?;
            extract_record::<Self::Record>(response, resource.record_keys)
        };
        resource
            .descriptor("update")
            .trigger(self.inner(), call, CollectionEvent::from_update)
            .await
    }

    /// Delete one record; deleting an id that is not held locally is a no-op.
    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> AsyncOutcome<String> {
        debug!("Sending request");
        let resource = self.resource();
        let transport = self.transport();
        let call = async move {
            transport.delete(&resource.item_path(&id)).await?;
            Ok::<_, TransportError>(id.to_string())
        };
        resource
            .descriptor("delete")
            .trigger(self.inner(), call, CollectionEvent::from_delete)
            .await
    }

    /// Run an entity-specific action. It settles exactly like an update.
    #[instrument(skip(self))]
    async fn perform_action(&self, id: &str, action: Self::Action) -> AsyncOutcome<Self::Record> {
        debug!("Sending request");
        let resource = self.resource();
        let transport = self.transport();
        let path = resource.action_path(&id, &action);
        let descriptor = resource.descriptor(action.verb());
        let method = action.method();
        let call = async move {
            let response = transport.send(method, &path, None).await?;
            extract_record::<Self::Record>(response, resource.record_keys)
        };
        descriptor
            .trigger(self.inner(), call, CollectionEvent::from_update)
            .await
    }

    /// Post a creation payload to `path`; the returned record joins the collection.
    async fn submit_create<P>(&self, path: &str, payload: &P) -> AsyncOutcome<Self::Record>
    where
        P: Serialize + Sync,
    {
        debug!("Sending request");
        let resource = self.resource();
        let transport = self.transport();
        let call = async move {
            let body = encode(payload)?;
            let response = transport.post(path, Some(body)).await?;
            extract_record::<Self::Record>(response, resource.record_keys)
        };
        resource
            .descriptor("create")
            .trigger(self.inner(), call, CollectionEvent::from_create)
            .await
    }

    /// Read the collection, ordered after every event dispatched so far.
    async fn state(&self) -> Result<CollectionState<Self::Record>, FrameworkError> {
        self.inner().snapshot().await
    }

    fn subscribe(&self) -> watch::Receiver<CollectionState<Self::Record>> {
        self.inner().subscribe()
    }
}

pub(crate) fn encode(payload: &impl Serialize) -> Result<Value, TransportError> {
    serde_json::to_value(payload).map_err(|e| TransportError::Encode(e.to_string()))
}
