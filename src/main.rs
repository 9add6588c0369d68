//! # Booking Sync Demo
//!
//! Connects to the configured API, loads the admin dashboard and the bookings collection,
//! logs what came back and shuts down.
//!
//! Configuration comes from `BOOKING_SYNC_*` variables; see
//! [`StoreConfig`](booking_sync::lifecycle::StoreConfig).

use booking_sync::clients::CollectionClient;
use booking_sync::lifecycle::{AppStore, StoreConfig};
use sync_framework::telemetry::setup_tracing;
use sync_framework::AsyncOutcome;
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = StoreConfig::from_env().map_err(|e| e.to_string())?;
    let store = AppStore::connect(&config).await.map_err(|e| e.to_string())?;

    let auth = store.auth.current();
    info!(authenticated = auth.is_authenticated(), "Store ready");

    let span = tracing::info_span!("dashboard");
    async {
        match store.dashboard.fetch().await {
            AsyncOutcome::Succeeded(data) => info!(
                users = data.users.len(),
                properties = data.properties.len(),
                public_properties = data.public_properties.len(),
                bookings = data.bookings.len(),
                "Dashboard loaded"
            ),
            AsyncOutcome::Failed(message) => error!(%message, "Dashboard unavailable"),
            AsyncOutcome::Pending => {}
        }
    }
    .instrument(span)
    .await;

    let span = tracing::info_span!("bookings");
    async {
        if let AsyncOutcome::Failed(message) = store.bookings.fetch_all().await {
            warn!(%message, "Bookings unavailable");
        }
    }
    .instrument(span)
    .await;

    match store.snapshot().await {
        Ok(state) => info!(
            bookings = state.bookings.items.len(),
            wishlist = state.wishlist.items.len(),
            last_fetched = ?state.dashboard.last_fetched,
            "Final state"
        ),
        Err(e) => error!(error = %e, "Snapshot failed"),
    }

    // Shutdown store gracefully
    store.shutdown().await?;

    info!("Done");
    Ok(())
}
