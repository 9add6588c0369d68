//! Property collection, including admin verification.

mod actions;
pub mod entity;

pub use actions::*;

use crate::clients::PropertyClient;
use crate::model::Property;
use std::sync::Arc;
use sync_framework::{CollectionSlice, Resource, SettlementPolicy, SliceActor, Transport};

pub const RESOURCE: Resource = Resource {
    path: "/api/properties",
    list_query: None,
    singular: "property",
    plural: "properties",
    list_keys: &["data", "properties"],
    record_keys: &["property", "data"],
};

pub type PropertySlice = CollectionSlice<Property>;

/// Creates a new Property slice actor and its client.
pub fn new(
    buffer_size: usize,
    policy: SettlementPolicy,
    transport: Arc<dyn Transport>,
) -> (SliceActor<PropertySlice>, PropertyClient) {
    let (actor, inner) = SliceActor::new(CollectionSlice::new(RESOURCE.plural, policy), buffer_size);
    (actor, PropertyClient::new(inner, transport))
}
