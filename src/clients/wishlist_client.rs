//! # Wishlist Client
//!
//! Confirm-then-apply mutations over the wishlist slice.
use crate::wishlist_slice::{
    WishlistEntry, WishlistEvent, WishlistSlice, WishlistState, LIST_KEYS, PATH,
};
use std::sync::Arc;
use sync_framework::{
    extract_list, AsyncOutcome, FrameworkError, RequestDescriptor, SliceClient, Transport,
    TransportError,
};
use tokio::sync::watch;
use tracing::{debug, instrument};

/// Client for the wishlist slice.
#[derive(Clone)]
pub struct WishlistClient {
    inner: SliceClient<WishlistSlice>,
    transport: Arc<dyn Transport>,
}

impl WishlistClient {
    pub fn new(inner: SliceClient<WishlistSlice>, transport: Arc<dyn Transport>) -> Self {
        Self { inner, transport }
    }

    pub fn inner(&self) -> &SliceClient<WishlistSlice> {
        &self.inner
    }

    /// Replace the local set with the server's wishlist.
    #[instrument(skip(self))]
    pub async fn fetch(&self) -> AsyncOutcome<Vec<String>> {
        debug!("Sending request");
        let transport = self.transport.as_ref();
        let call = async move {
            let body = transport.get(PATH).await?;
            let entries = extract_list::<WishlistEntry>(body, LIST_KEYS)?;
            let ids = entries.into_iter().filter_map(WishlistEntry::into_id);
            Ok::<_, TransportError>(ids.collect())
        };
        RequestDescriptor::new("fetch wishlist", "Failed to fetch wishlist")
            .trigger(&self.inner, call, WishlistEvent::from_fetch)
            .await
    }

    /// Add `id` once the server confirms. Adding an id already present changes nothing.
    #[instrument(skip(self))]
    pub async fn add(&self, id: &str) -> AsyncOutcome<String> {
        debug!("Sending request");
        let transport = self.transport.as_ref();
        let call = async move {
            transport.post(&format!("{PATH}/{id}"), None).await?;
            Ok::<_, TransportError>(id.to_string())
        };
        RequestDescriptor::new("add to wishlist", "Failed to add to wishlist")
            .trigger(&self.inner, call, WishlistEvent::from_add)
            .await
    }

    /// Remove `id` once the server confirms. Removing an absent id is a no-op.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> AsyncOutcome<String> {
        debug!("Sending request");
        let transport = self.transport.as_ref();
        let call = async move {
            transport.delete(&format!("{PATH}/{id}")).await?;
            Ok::<_, TransportError>(id.to_string())
        };
        RequestDescriptor::new("remove from wishlist", "Failed to remove from wishlist")
            .trigger(&self.inner, call, WishlistEvent::from_remove)
            .await
    }

    pub async fn state(&self) -> Result<WishlistState, FrameworkError> {
        self.inner.snapshot().await
    }

    pub fn subscribe(&self) -> watch::Receiver<WishlistState> {
        self.inner.subscribe()
    }
}
