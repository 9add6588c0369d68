//! # Booking Sync
//!
//! > **A client-side state layer for a booking and listing API.**
//!
//! This crate mirrors the server-owned collections of a booking application (users,
//! employees, properties, public properties, bookings), the signed-in user's wishlist, and a
//! composite admin dashboard. Every branch is driven by the same asynchronous request
//! lifecycle, and only the authentication branch survives a restart.
//!
//! ## 🏗️ Design Philosophy
//!
//! - **One owner per branch**: each branch is a [`Slice`](sync_framework::Slice) owned by
//!   its own actor. No branch ever mutates another.
//! - **Outcomes, not exceptions**: every triggered operation resolves to an
//!   [`AsyncOutcome`](sync_framework::AsyncOutcome). Failures are recorded in the branch's
//!   `error` field and never returned as `Err`.
//! - **Closed events**: each branch has its own event enum, so an unhandled transition is a
//!   compile error.
//! - **Typed persistence**: the persisted record is
//!   [`PersistedRoot`](lifecycle::PersistedRoot), which holds the auth branch and nothing else.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`sync_framework`])
//! Slice actors, the request descriptor, settlement epochs, the generic entity collection
//! and the HTTP transport.
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! - **Role**: configuration, durable storage, the persistence gate, and the [`AppStore`](lifecycle::AppStore) root.
//!
//! ### 3. The Interface ([`clients`])
//! - **Role**: typed clients that perform the remote call and feed the outcome into their slice.
//! - **Key items**: [`CollectionClient`](clients::CollectionClient), [`DashboardClient`](clients::DashboardClient).
//!
//! ### 4. The Branches
//! - Entity collections: [`user_slice`], [`employee_slice`], [`property_slice`],
//!   [`public_property_slice`], [`booking_slice`]
//! - [`wishlist_slice`]: confirm-then-apply membership set
//! - [`dashboard_slice`]: the composite aggregate
//! - [`auth_slice`]: the persisted session
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! BOOKING_SYNC_API_URL=http://localhost:5000 RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod auth_slice;
pub mod booking_slice;
pub mod clients;
pub mod dashboard_slice;
pub mod employee_slice;
pub mod lifecycle;
pub mod model;
pub mod property_slice;
pub mod public_property_slice;
pub mod user_slice;
pub mod wishlist_slice;
