//! # Dashboard Client
//!
//! Issues the four aggregate fetches concurrently and applies the guarded/unguarded policy.
use crate::dashboard_slice::{
    DashboardData, DashboardEvent, DashboardSection, DashboardSlice, DashboardState, SectionData,
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use sync_framework::{
    extract_list, AsyncOutcome, FrameworkError, RequestDescriptor, SliceClient, Transport,
    TransportError,
};
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

/// Client for the dashboard slice.
#[derive(Clone)]
pub struct DashboardClient {
    inner: SliceClient<DashboardSlice>,
    transport: Arc<dyn Transport>,
}

impl DashboardClient {
    pub fn new(inner: SliceClient<DashboardSlice>, transport: Arc<dyn Transport>) -> Self {
        Self { inner, transport }
    }

    pub fn inner(&self) -> &SliceClient<DashboardSlice> {
        &self.inner
    }

    /// Fetch all four sections and replace `data` wholesale.
    ///
    /// A public-properties failure degrades to an empty list. Otherwise the first failure,
    /// in the order users, properties, bookings, fails the aggregate and `data` keeps its
    /// previous value.
    #[instrument(skip(self))]
    pub async fn fetch(&self) -> AsyncOutcome<DashboardData> {
        debug!("Sending requests");
        let transport = self.transport.as_ref();
        let call = async move {
            let (users, properties, public_properties, bookings) = tokio::join!(
                fetch_section(transport, DashboardSection::Users),
                fetch_section(transport, DashboardSection::Properties),
                fetch_section(transport, DashboardSection::PublicProperties),
                fetch_section(transport, DashboardSection::Bookings),
            );
            let public_properties = public_properties.unwrap_or_else(|error| {
                warn!(%error, "Public properties unavailable, using an empty list");
                Vec::new()
            });
            Ok::<_, TransportError>(DashboardData {
                users: users?,
                properties: properties?,
                public_properties,
                bookings: bookings?,
            })
        };

        RequestDescriptor::new("fetch dashboard", "Failed to fetch dashboard data")
            .trigger(&self.inner, call, |signal| {
                let epoch = signal.epoch;
                Some(match signal.outcome {
                    AsyncOutcome::Pending => DashboardEvent::FetchPending { epoch },
                    AsyncOutcome::Succeeded(data) => DashboardEvent::FetchSucceeded {
                        epoch,
                        data,
                        at: Utc::now(),
                    },
                    AsyncOutcome::Failed(message) => DashboardEvent::FetchFailed { epoch, message },
                })
            })
            .await
    }

    /// Re-fetch one section. When the aggregate has been populated, only that field of
    /// `data` is replaced and `last_fetched` re-stamped. `loading` and `error` are never
    /// touched; a failure is logged and returned.
    #[instrument(skip(self))]
    pub async fn refresh_section(&self, section: DashboardSection) -> AsyncOutcome<DashboardSection> {
        debug!("Sending request");
        let transport = self.transport.as_ref();
        let call = async move {
            Ok::<_, TransportError>(match section {
                DashboardSection::Users => SectionData::Users(fetch_section(transport, section).await?),
                DashboardSection::Properties => {
                    SectionData::Properties(fetch_section(transport, section).await?)
                }
                DashboardSection::PublicProperties => {
                    SectionData::PublicProperties(fetch_section(transport, section).await?)
                }
                DashboardSection::Bookings => {
                    SectionData::Bookings(fetch_section(transport, section).await?)
                }
            })
        };

        RequestDescriptor::new(format!("refresh {section}"), format!("Failed to refresh {section}"))
            .trigger(&self.inner, call, |signal| match signal.outcome {
                AsyncOutcome::Succeeded(section) => Some(DashboardEvent::SectionRefreshed {
                    section,
                    at: Utc::now(),
                }),
                AsyncOutcome::Pending | AsyncOutcome::Failed(_) => None,
            })
            .await
            .map(|data| data.section())
    }

    pub async fn state(&self) -> Result<DashboardState, FrameworkError> {
        self.inner.snapshot().await
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.inner.subscribe()
    }
}

async fn fetch_section<T: DeserializeOwned>(
    transport: &dyn Transport,
    section: DashboardSection,
) -> Result<Vec<T>, TransportError> {
    let body = transport.get(section.path()).await?;
    extract_list(body, section.list_keys())
}
