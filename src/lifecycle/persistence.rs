//! # Selective Persistence
//!
//! Only the auth branch survives a reload. The persisted record *is* [`PersistedRoot`], so
//! the set of persisted branches is fixed by the type: adding a branch means adding a field
//! here, and nothing else can be written or read back by accident. Every other branch always
//! starts from its initial shape, whatever an older schema left in storage.
//!
//! ## Write path
//!
//! The [`PersistenceGate`] watches the auth slice and writes whenever the serialized record
//! changes. Transient `loading`/`error` flips serialize identically and are skipped. Writes
//! run on the blocking pool and nothing waits for them.
//!
//! ## Read path
//!
//! [`rehydrate`] runs before any actor starts. A missing, unreadable or corrupt record is
//! logged and treated as "no prior session".

use crate::auth_slice::AuthState;
use crate::lifecycle::storage::{DurableStorage, StorageError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Storage key of the persisted record.
pub const ROOT_KEY: &str = "persist:root";

/// The persisted subset of the state tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedRoot {
    #[serde(default)]
    pub auth: AuthState,
}

impl PersistedRoot {
    pub fn encode(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(raw: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Read the persisted auth branch, falling back to the initial shape.
pub async fn rehydrate(storage: Arc<dyn DurableStorage>) -> AuthState {
    let read = tokio::task::spawn_blocking(move || storage.read(ROOT_KEY)).await;
    let raw = match read {
        Ok(Ok(Some(raw))) => raw,
        Ok(Ok(None)) => {
            debug!("No persisted session");
            return AuthState::default();
        }
        Ok(Err(e)) => {
            warn!(error = %e, "Persisted session unreadable, starting signed out");
            return AuthState::default();
        }
        Err(e) => {
            warn!(error = %e, "Rehydration task failed, starting signed out");
            return AuthState::default();
        }
    };

    match PersistedRoot::decode(&raw) {
        Ok(root) => {
            info!(authenticated = root.auth.is_authenticated(), "Session rehydrated");
            root.auth
        }
        Err(e) => {
            warn!(error = %e, "Persisted session corrupt, starting signed out");
            AuthState::default()
        }
    }
}

/// Writes the auth branch to durable storage whenever it changes.
pub struct PersistenceGate {
    storage: Arc<dyn DurableStorage>,
    watcher: watch::Receiver<AuthState>,
    last_written: Option<String>,
}

impl PersistenceGate {
    /// `watcher` must come from [`SliceClient::subscribe`](sync_framework::SliceClient::subscribe)
    /// so the rehydrated value is not written straight back.
    pub fn new(storage: Arc<dyn DurableStorage>, watcher: watch::Receiver<AuthState>) -> Self {
        let last_written = PersistedRoot {
            auth: watcher.borrow().clone(),
        }
        .encode()
        .ok();
        Self {
            storage,
            watcher,
            last_written,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Runs until the auth slice stops publishing.
    pub async fn run(mut self) {
        info!("Persistence gate started");

        while self.watcher.changed().await.is_ok() {
            let auth = self.watcher.borrow_and_update().clone();
            let record = match (PersistedRoot { auth }).encode() {
                Ok(record) => record,
                Err(e) => {
                    warn!(error = %e, "Auth branch not serializable, write skipped");
                    continue;
                }
            };
            if self.last_written.as_deref() == Some(record.as_str()) {
                continue;
            }

            let storage = self.storage.clone();
            let payload = record.clone();
            match tokio::task::spawn_blocking(move || storage.write(ROOT_KEY, &payload)).await {
                Ok(Ok(())) => {
                    debug!(bytes = record.len(), "Session persisted");
                    self.last_written = Some(record);
                }
                Ok(Err(e)) => warn!(error = %e, "Session write failed"),
                Err(e) => warn!(error = %e, "Session write task failed"),
            }
        }

        info!("Persistence gate stopped");
    }
}
