//! Typed clients over the slice actors.
//!
//! Each client pairs a [`SliceClient`](sync_framework::SliceClient) with the shared
//! [`Transport`](sync_framework::Transport): it performs the remote call and feeds the
//! outcome into its own slice. Entity collections share [`CollectionClient`].

pub mod auth_client;
pub mod booking_client;
pub mod collection_client;
pub mod dashboard_client;
pub mod employee_client;
pub mod property_client;
pub mod public_property_client;
pub mod user_client;
pub mod wishlist_client;

pub use auth_client::*;
pub use booking_client::*;
pub use collection_client::*;
pub use dashboard_client::*;
pub use employee_client::*;
pub use property_client::*;
pub use public_property_client::*;
pub use user_client::*;
pub use wishlist_client::*;
