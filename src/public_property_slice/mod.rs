//! Public property collection.
//!
//! The collection lives under `/api/public-properties`. The dashboard reads the same data
//! from the legacy `/api/publicProperties` listing instead.

pub mod entity;

use crate::clients::PublicPropertyClient;
use crate::model::PublicProperty;
use std::sync::Arc;
use sync_framework::{CollectionSlice, Resource, SettlementPolicy, SliceActor, Transport};

pub const RESOURCE: Resource = Resource {
    path: "/api/public-properties",
    list_query: None,
    singular: "public property",
    plural: "public properties",
    list_keys: &["data", "publicProperties", "properties"],
    record_keys: &["publicProperty", "property", "data"],
};

pub type PublicPropertySlice = CollectionSlice<PublicProperty>;

/// Creates a new PublicProperty slice actor and its client.
pub fn new(
    buffer_size: usize,
    policy: SettlementPolicy,
    transport: Arc<dyn Transport>,
) -> (SliceActor<PublicPropertySlice>, PublicPropertyClient) {
    let slice = CollectionSlice::new("public_properties", policy);
    let (actor, inner) = SliceActor::new(slice, buffer_size);
    (actor, PublicPropertyClient::new(inner, transport))
}
