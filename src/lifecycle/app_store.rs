use crate::auth_slice::{AuthSlice, AuthState};
use crate::clients::{
    AuthClient, BookingClient, CollectionClient, DashboardClient, EmployeeClient, PropertyClient,
    PublicPropertyClient, UserClient, WishlistClient,
};
use crate::dashboard_slice::DashboardState;
use crate::lifecycle::config::StoreConfig;
use crate::lifecycle::persistence::{rehydrate, PersistenceGate};
use crate::lifecycle::storage::{DurableStorage, FileStorage};
use crate::model::{Booking, Property, PublicProperty, User};
use crate::wishlist_slice::WishlistState;
use std::sync::Arc;
use sync_framework::{
    CollectionState, FrameworkError, HttpTransport, SliceActor, SliceClient, Transport,
};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP client could not be built: {0}")]
    Client(String),
}

/// A full snapshot of the state tree.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub auth: AuthState,
    pub users: CollectionState<User>,
    pub employees: CollectionState<User>,
    pub properties: CollectionState<Property>,
    pub public_properties: CollectionState<PublicProperty>,
    pub bookings: CollectionState<Booking>,
    pub wishlist: WishlistState,
    pub dashboard: DashboardState,
}

/// The application state container.
///
/// `AppStore` is responsible for:
/// - **Rehydration**: reading the persisted auth branch before any slice starts
/// - **Lifecycle Management**: spawning every slice actor and the persistence gate
/// - **The Read/Write Surface**: one typed client per branch, as public fields
///
/// # Example
///
/// ```ignore
/// let store = AppStore::connect(&StoreConfig::from_env()?).await?;
///
/// store.bookings.fetch_all().await;
/// let state = store.snapshot().await?;
///
/// // Gracefully shut down when done
/// store.shutdown().await?;
/// ```
pub struct AppStore {
    pub auth: AuthClient,
    pub users: UserClient,
    pub employees: EmployeeClient,
    pub properties: PropertyClient,
    pub public_properties: PublicPropertyClient,
    pub bookings: BookingClient,
    pub wishlist: WishlistClient,
    pub dashboard: DashboardClient,

    /// Slice actor tasks (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
    gate: JoinHandle<()>,
}

impl AppStore {
    /// Creates the store over an explicit transport and storage.
    ///
    /// The auth branch is rehydrated from `storage` first; every other branch starts from
    /// its initial shape.
    pub async fn new(
        transport: Arc<dyn Transport>,
        storage: Arc<dyn DurableStorage>,
        config: &StoreConfig,
    ) -> Self {
        let auth = rehydrate(storage.clone()).await;
        let session = crate::auth_slice::new(config.buffer_size, auth);
        Self::assemble(transport, storage, config, session)
    }

    /// Creates the store against the configured HTTP API, persisting under `state_dir`.
    ///
    /// Every request carries the token of the session current at the time it is sent, so
    /// login, logout and reset take effect on the next request.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Client`] when the HTTP client cannot be built.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let storage: Arc<dyn DurableStorage> = Arc::new(FileStorage::new(config.state_dir.clone()));
        let auth = rehydrate(storage.clone()).await;
        let (auth_actor, auth) = crate::auth_slice::new(config.buffer_size, auth);

        // Only the receiver is captured; holding a client would keep the auth actor alive.
        let current = auth.subscribe();
        let http = HttpTransport::new(config.api_base_url.clone(), config.request_timeout)
            .map_err(|e| StoreError::Client(e.to_string()))?
            .with_token_source(move || current.borrow().token.clone());
        info!(api = %config.api_base_url, state_dir = %config.state_dir.display(), "Connecting");

        Ok(Self::assemble(Arc::new(http), storage, config, (auth_actor, auth)))
    }

    fn assemble(
        transport: Arc<dyn Transport>,
        storage: Arc<dyn DurableStorage>,
        config: &StoreConfig,
        (auth_actor, auth): (SliceActor<AuthSlice>, SliceClient<AuthSlice>),
    ) -> Self {
        let buffer = config.buffer_size;
        let policy = config.settlement;

        // 1. Create slice actors
        let auth = AuthClient::new(auth, transport.clone());
        let (user_actor, users) = crate::user_slice::new(buffer, policy, transport.clone());
        let (employee_actor, employees) =
            crate::employee_slice::new(buffer, policy, transport.clone());
        let (property_actor, properties) =
            crate::property_slice::new(buffer, policy, transport.clone());
        let (public_actor, public_properties) =
            crate::public_property_slice::new(buffer, policy, transport.clone());
        let (booking_actor, bookings) =
            crate::booking_slice::new(buffer, policy, transport.clone());
        let (wishlist_actor, wishlist) =
            crate::wishlist_slice::new(buffer, policy, transport.clone());
        let (dashboard_actor, dashboard) = crate::dashboard_slice::new(buffer, policy, transport);

        // 2. The gate subscribes before the auth actor runs, so it sees every change
        let gate = PersistenceGate::new(storage, auth.subscribe()).spawn();

        // 3. Start actors
        let handles = vec![
            tokio::spawn(auth_actor.run()),
            tokio::spawn(user_actor.run()),
            tokio::spawn(employee_actor.run()),
            tokio::spawn(property_actor.run()),
            tokio::spawn(public_actor.run()),
            tokio::spawn(booking_actor.run()),
            tokio::spawn(wishlist_actor.run()),
            tokio::spawn(dashboard_actor.run()),
        ];
        info!(slices = handles.len(), ?policy, "Store started");

        Self {
            auth,
            users,
            employees,
            properties,
            public_properties,
            bookings,
            wishlist,
            dashboard,
            handles,
            gate,
        }
    }

    /// Read every branch.
    pub async fn snapshot(&self) -> Result<AppState, FrameworkError> {
        let (auth, users, employees, properties, public_properties, bookings, wishlist, dashboard) =
            tokio::try_join!(
                self.auth.state(),
                self.users.state(),
                self.employees.state(),
                self.properties.state(),
                self.public_properties.state(),
                self.bookings.state(),
                self.wishlist.state(),
                self.dashboard.state(),
            )?;
        Ok(AppState {
            auth,
            users,
            employees,
            properties,
            public_properties,
            bookings,
            wishlist,
            dashboard,
        })
    }

    /// Full container reset: every branch, auth included, returns to its initial shape.
    /// The signed-out auth branch is persisted like any other auth change.
    pub async fn reset(&self) -> Result<(), FrameworkError> {
        info!("Resetting store");
        tokio::try_join!(
            self.auth.inner().reset(),
            self.users.inner().reset(),
            self.employees.inner().reset(),
            self.properties.inner().reset(),
            self.public_properties.inner().reset(),
            self.bookings.inner().reset(),
            self.wishlist.inner().reset(),
            self.dashboard.inner().reset(),
        )?;
        Ok(())
    }

    /// Gracefully shuts down the store.
    ///
    /// 1. Drops all clients, which closes the slice channels
    /// 2. Waits for every actor task, then for the persistence gate to drain
    /// 3. Returns an error if any task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down store...");

        // Step 1: Close all channels by dropping clients
        drop(self.auth);
        drop(self.users);
        drop(self.employees);
        drop(self.properties);
        drop(self.public_properties);
        drop(self.bookings);
        drop(self.wishlist);
        drop(self.dashboard);

        // Step 2: Wait for the actors, then for the gate to drain
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Slice task failed: {:?}", e);
                return Err(format!("Slice task failed: {:?}", e));
            }
        }
        // The auth actor has dropped its publisher, so the gate finishes its last write and exits.
        if let Err(e) = self.gate.await {
            error!("Persistence gate failed: {:?}", e);
            return Err(format!("Persistence gate failed: {:?}", e));
        }

        info!("Store shutdown complete.");
        Ok(())
    }
}
