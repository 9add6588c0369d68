//! # Store Lifecycle & Orchestration
//!
//! This module manages the runtime lifecycle of the state container: loading configuration,
//! rehydrating the persisted branch, starting every slice actor, and shutting them down.
//!
//! ## The Orchestration Pattern
//!
//! Individual slices are simple. **Wiring them together** is where the ordering rules live,
//! and [`AppStore`] is the one place that knows them:
//!
//! 1. **Rehydration** - Read the persisted auth branch before any actor exists
//! 2. **Actor Creation** - Instantiate every slice actor and its typed client
//! 3. **Persistence** - Start the [`PersistenceGate`] on the auth branch
//! 4. **Graceful Shutdown** - Drop clients, await actors, then let the gate drain
//!
//! ```rust,ignore
//! let config = StoreConfig::from_env()?;
//! let store = AppStore::connect(&config).await?;
//!
//! store.dashboard.fetch().await;
//! store.shutdown().await?;
//! ```
//!
//! ## Explicit Construction
//!
//! There is no process-wide singleton. Tests build a fresh store per case with
//! [`AppStore::new`], a [`MockTransport`](sync_framework::mock::MockTransport) and a
//! [`MemoryStorage`], and tear it down with [`AppStore::shutdown`].
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - Closes the sender side of every slice channel
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - Wait for all actor tasks to finish
//! 4. **Drain the gate** - The auth actor's publisher is gone, so the gate exits after
//!    its last write
//!
//! ## Observability & Tracing
//!
//! Call [`setup_tracing`](sync_framework::telemetry::setup_tracing) once at startup.
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full payloads
//! ```

pub mod app_store;
pub mod config;
pub mod persistence;
pub mod storage;

pub use app_store::*;
pub use config::*;
pub use persistence::*;
pub use storage::*;
