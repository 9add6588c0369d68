//! User collection (every role).

pub mod entity;

use crate::clients::UserClient;
use crate::model::User;
use std::sync::Arc;
use sync_framework::{CollectionSlice, Resource, SettlementPolicy, SliceActor, Transport};

pub const RESOURCE: Resource = Resource {
    path: "/api/users",
    list_query: None,
    singular: "user",
    plural: "users",
    list_keys: &["data", "users"],
    record_keys: &["user", "data"],
};

/// Signup endpoint shared by users and employees.
pub const SIGNUP_PATH: &str = "/api/users/signup";

pub type UserSlice = CollectionSlice<User>;

/// Creates a new User slice actor and its client.
pub fn new(
    buffer_size: usize,
    policy: SettlementPolicy,
    transport: Arc<dyn Transport>,
) -> (SliceActor<UserSlice>, UserClient) {
    let (actor, inner) = SliceActor::new(CollectionSlice::new(RESOURCE.plural, policy), buffer_size);
    (actor, UserClient::new(inner, transport))
}
